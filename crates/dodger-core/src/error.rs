use crate::geometry::HitboxInset;

/// Malformed geometry rejected at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    NonFinite,
    NonPositiveSize {
        width: f32,
        height: f32,
    },
    InvalidInset(HitboxInset),
    InsetTooLarge {
        inset: HitboxInset,
        width: f32,
        height: f32,
    },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite => write!(f, "box components must be finite"),
            Self::NonPositiveSize { width, height } => {
                write!(f, "box size must be positive, got {width}x{height}")
            },
            Self::InvalidInset(inset) => {
                write!(f, "hitbox inset margins must be finite and >= 0: {inset:?}")
            },
            Self::InsetTooLarge {
                inset,
                width,
                height,
            } => write!(
                f,
                "hitbox inset {inset:?} leaves nothing of a {width}x{height} box"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}
