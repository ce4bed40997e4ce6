//! Result of one render cycle

use serde::{Deserialize, Serialize};

use super::params::DashboardParams;
use super::view::DashboardView;
use crate::models::controller::ControllerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// User-visible message shown above the page content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub params: DashboardParams,
    /// Absent when the render cycle halted early
    pub view: Option<DashboardView>,
    pub config: Option<ControllerConfig>,
    pub notices: Vec<Notice>,
}

impl DashboardState {
    pub fn new(params: DashboardParams) -> Self {
        Self {
            params,
            view: None,
            config: None,
            notices: Vec::new(),
        }
    }

    pub fn halted(params: DashboardParams, notice: Notice) -> Self {
        Self {
            notices: vec![notice],
            ..Self::new(params)
        }
    }

    pub fn is_halted(&self) -> bool {
        self.view.is_none()
    }
}
