//! Display-agnostic scene description
//!
//! A scene is a tree of shapes positioned by `shift`. Elements later in a
//! list draw on top of earlier ones. Any backend that can fill circles and
//! rectangles and place text can draw it.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// RGBA, 0-1
pub type Color = [f32; 4];

/// Shown in the message slot while paused
pub const PAUSED_MESSAGE: &str = "SPACE to start, WS and arrows to move";

/// Offset of the score label and message from the board edge
const TEXT_INSET: f32 = 40.0;

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub field: Color,
    pub ball: Color,
    pub paddle: Color,
    pub text: Color,
}

impl Palette {
    /// Green table, white pieces
    pub const fn classic() -> Self {
        Self {
            background: [0.02, 0.02, 0.05, 1.0],
            field: [60.0 / 255.0, 100.0 / 255.0, 60.0 / 255.0, 1.0],
            ball: [1.0, 1.0, 1.0, 1.0],
            paddle: [1.0, 1.0, 1.0, 1.0],
            text: [160.0 / 255.0, 200.0 / 255.0, 160.0 / 255.0, 1.0],
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            background: [0.0, 0.0, 0.0, 1.0],
            field: [0.0, 0.0, 0.0, 1.0],
            ball: [1.0, 1.0, 0.0, 1.0],
            paddle: [1.0, 1.0, 1.0, 1.0],
            text: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// A filled primitive centered on its position
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f32, color: Color },
    Rect { width: f32, height: f32, color: Color },
    Text { content: String, size: f32, color: Color },
}

/// Node of the scene tree
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Shape(Shape),
    /// Child translated by an offset
    Shift(Vec2, Box<Element>),
    /// Children in z-order
    Group(Vec<Element>),
}

impl Element {
    pub fn shift(self, offset: Vec2) -> Self {
        Element::Shift(offset, Box::new(self))
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Element::Shape(shape)
    }
}

/// A complete frame to draw
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub elements: Vec<Element>,
}

impl Scene {
    /// Every shape with its absolute position, in draw order
    pub fn flatten(&self) -> Vec<(Vec2, &Shape)> {
        let mut out = Vec::new();
        for element in &self.elements {
            collect(element, Vec2::ZERO, &mut out);
        }
        out
    }

    /// Text shapes only, with absolute positions
    pub fn texts(&self) -> Vec<(Vec2, &str)> {
        self.flatten()
            .into_iter()
            .filter_map(|(pos, shape)| match shape {
                Shape::Text { content, .. } => Some((pos, content.as_str())),
                _ => None,
            })
            .collect()
    }
}

fn collect<'a>(element: &'a Element, origin: Vec2, out: &mut Vec<(Vec2, &'a Shape)>) {
    match element {
        Element::Shape(shape) => out.push((origin, shape)),
        Element::Shift(offset, child) => collect(child, origin + *offset, out),
        Element::Group(children) => {
            for child in children {
                collect(child, origin, out);
            }
        }
    }
}

/// Build the scene for a game state
pub fn render(state: &GameState, palette: &Palette) -> Scene {
    let paddle = |pos: Vec2| {
        Element::from(Shape::Rect {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color: palette.paddle,
        })
        .shift(pos)
    };

    let label = |content: String, y: f32| {
        Element::from(Shape::Text {
            content,
            size: 20.0,
            color: palette.text,
        })
        .shift(Vec2::new(0.0, y))
    };

    let mut elements = vec![
        Element::from(Shape::Rect {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            color: palette.field,
        }),
        Element::from(Shape::Circle {
            radius: BALL_RADIUS,
            color: palette.ball,
        })
        .shift(state.ball.pos),
        Element::Group(vec![paddle(state.player1.pos), paddle(state.player2.pos)]),
        label(state.score_line(), HALF_HEIGHT - TEXT_INSET),
    ];

    if state.phase == GamePhase::Paused {
        elements.push(label(PAUSED_MESSAGE.to_owned(), TEXT_INSET - HALF_HEIGHT));
    }

    Scene { elements }
}
