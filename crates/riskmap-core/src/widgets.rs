// crates/riskmap-core/src/widgets.rs
//! Side navigation and the two info popups.
//!
//! These widgets keep no state of their own: current visibility is read from
//! the DOM, and the functions here only decide what the next `display`
//! values should be.
use crate::config::DomIds;
use crate::error::{Result, RiskMapError};

/// CSS `display` value for a shown or hidden element.
pub fn display_value(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

/// A single `display` change on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange<'a> {
    pub element_id: &'a str,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Open,
    Closed,
}

impl NavState {
    /// Open shows the side container and hides the open button; closed is
    /// the reverse.
    pub fn changes(self, ids: &DomIds) -> [VisibilityChange<'_>; 2] {
        let open = self == NavState::Open;
        [
            VisibilityChange {
                element_id: &ids.side_container,
                visible: open,
            },
            VisibilityChange {
                element_id: &ids.open_button,
                visible: !open,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Description,
    Acknowledgment,
}

impl Popup {
    /// Page markup refers to the popups as `1` and `2`.
    pub fn from_number(n: u32) -> Result<Self> {
        match n {
            1 => Ok(Popup::Description),
            2 => Ok(Popup::Acknowledgment),
            other => Err(RiskMapError::InvalidData(format!("unknown popup {other}"))),
        }
    }

    pub fn other(self) -> Self {
        match self {
            Popup::Description => Popup::Acknowledgment,
            Popup::Acknowledgment => Popup::Description,
        }
    }

    pub fn element_id(self, ids: &DomIds) -> &str {
        match self {
            Popup::Description => &ids.description_popup,
            Popup::Acknowledgment => &ids.acknowledge_popup,
        }
    }
}

/// What clicking a popup's button does.
///
/// A visible target closes. Otherwise the other popup closes and the target
/// opens, so at most one popup is ever shown.
pub fn popup_toggle_plan(
    target: Popup,
    target_visible: bool,
    ids: &DomIds,
) -> Vec<VisibilityChange<'_>> {
    if target_visible {
        return vec![VisibilityChange {
            element_id: target.element_id(ids),
            visible: false,
        }];
    }
    vec![
        VisibilityChange {
            element_id: target.other().element_id(ids),
            visible: false,
        },
        VisibilityChange {
            element_id: target.element_id(ids),
            visible: true,
        },
    ]
}
