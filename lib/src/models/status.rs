/// Outcome of probing one stored bookmark, ready to be written back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub id: usize,
    pub dead: bool,
    pub redirect: bool,
    pub redirect_url: Option<String>,
}

impl StatusUpdate {
    pub fn live(id: usize) -> Self {
        Self {
            id,
            dead: false,
            redirect: false,
            redirect_url: None,
        }
    }

    /// Transport failure or error status. Redirect classification is skipped.
    pub fn dead(id: usize) -> Self {
        Self {
            dead: true,
            ..Self::live(id)
        }
    }

    pub fn redirected(id: usize, target: impl Into<String>) -> Self {
        Self {
            redirect: true,
            redirect_url: Some(target.into()),
            ..Self::live(id)
        }
    }

    /// Report bucket: dead wins over redirect, anything else is valid
    pub fn category(&self) -> LinkCategory {
        if self.dead {
            LinkCategory::Dead
        } else if self.redirect {
            LinkCategory::Redirect
        } else {
            LinkCategory::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCategory {
    Valid,
    Dead,
    Redirect,
}
