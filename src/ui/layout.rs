//! Window geometry for the chrome and page web views.

use wry::dpi::{LogicalPosition, LogicalSize};
use wry::Rect;

/// Menu row + toolbar row + tab strip.
pub const TOOLBAR_HEIGHT: f64 = 100.0;
pub const STATUS_HEIGHT: f64 = 22.0;
pub const FIND_BAR_HEIGHT: f64 = 34.0;

/// A rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Area {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Area {
    pub fn to_rect(self) -> Rect {
        Rect {
            position: LogicalPosition::new(self.x, self.y).into(),
            size: LogicalSize::new(self.width, self.height).into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub toolbar: Area,
    pub content: Area,
    pub footer: Area,
}

impl Layout {
    /// Splits a window of `width` x `height` logical pixels. The footer grows
    /// by the find bar when it is visible; the page area takes what is left.
    pub fn compute(width: f64, height: f64, find_bar_visible: bool) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let toolbar_height = TOOLBAR_HEIGHT.min(height);
        let mut footer_height = STATUS_HEIGHT;
        if find_bar_visible {
            footer_height += FIND_BAR_HEIGHT;
        }
        let footer_height = footer_height.min(height - toolbar_height);
        let content_height = (height - toolbar_height - footer_height).max(0.0);

        Self {
            toolbar: Area {
                x: 0.0,
                y: 0.0,
                width,
                height: toolbar_height,
            },
            content: Area {
                x: 0.0,
                y: toolbar_height,
                width,
                height: content_height,
            },
            footer: Area {
                x: 0.0,
                y: toolbar_height + content_height,
                width,
                height: footer_height,
            },
        }
    }
}
