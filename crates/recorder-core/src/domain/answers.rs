//! Predefined usage events
//!
//! The Answers backend ships a fixed catalogue of events (sign up, purchase,
//! level end, ...) with a few typed fields each, plus free-form custom
//! events. Every variant also carries a map of custom attributes.

use serde::{Deserialize, Serialize};

use super::attribute::{AttributeValue, Attributes};

/// A usage event in the Answers catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnswersEvent {
    SignUp {
        method: Option<String>,
        success: Option<bool>,
        custom_attributes: Attributes,
    },
    Login {
        method: Option<String>,
        success: Option<bool>,
        custom_attributes: Attributes,
    },
    Share {
        method: Option<String>,
        content_name: Option<String>,
        content_type: Option<String>,
        content_id: Option<String>,
        custom_attributes: Attributes,
    },
    Invite {
        method: Option<String>,
        custom_attributes: Attributes,
    },
    Purchase {
        /// Decimal price rendered as a string to avoid float rounding
        price: Option<String>,
        /// ISO 4217 currency code
        currency: Option<String>,
        success: Option<bool>,
        item_name: Option<String>,
        item_type: Option<String>,
        item_id: Option<String>,
        custom_attributes: Attributes,
    },
    LevelStart {
        level_name: Option<String>,
        custom_attributes: Attributes,
    },
    LevelEnd {
        level_name: Option<String>,
        score: Option<f64>,
        success: Option<bool>,
        custom_attributes: Attributes,
    },
    AddToCart {
        price: Option<String>,
        currency: Option<String>,
        item_name: Option<String>,
        item_type: Option<String>,
        item_id: Option<String>,
        custom_attributes: Attributes,
    },
    StartCheckout {
        total_price: Option<String>,
        currency: Option<String>,
        item_count: Option<u32>,
        custom_attributes: Attributes,
    },
    Rating {
        rating: Option<f64>,
        content_name: Option<String>,
        content_type: Option<String>,
        content_id: Option<String>,
        custom_attributes: Attributes,
    },
    ContentView {
        content_name: Option<String>,
        content_type: Option<String>,
        content_id: Option<String>,
        custom_attributes: Attributes,
    },
    Search {
        query: Option<String>,
        custom_attributes: Attributes,
    },
    Custom {
        name: String,
        custom_attributes: Attributes,
    },
}

impl AnswersEvent {
    /// A custom event with no attributes
    pub fn custom(name: impl Into<String>) -> Self {
        AnswersEvent::Custom {
            name: name.into(),
            custom_attributes: Attributes::new(),
        }
    }

    /// A login event
    pub fn login(method: Option<String>, success: Option<bool>) -> Self {
        AnswersEvent::Login {
            method,
            success,
            custom_attributes: Attributes::new(),
        }
    }

    /// A sign-up event
    pub fn sign_up(method: Option<String>, success: Option<bool>) -> Self {
        AnswersEvent::SignUp {
            method,
            success,
            custom_attributes: Attributes::new(),
        }
    }

    /// Name shown in the Answers dashboard
    pub fn name(&self) -> &str {
        match self {
            AnswersEvent::SignUp { .. } => "Sign Up",
            AnswersEvent::Login { .. } => "Login",
            AnswersEvent::Share { .. } => "Share",
            AnswersEvent::Invite { .. } => "Invite",
            AnswersEvent::Purchase { .. } => "Purchase",
            AnswersEvent::LevelStart { .. } => "Level Start",
            AnswersEvent::LevelEnd { .. } => "Level End",
            AnswersEvent::AddToCart { .. } => "Add To Cart",
            AnswersEvent::StartCheckout { .. } => "Start Checkout",
            AnswersEvent::Rating { .. } => "Rating",
            AnswersEvent::ContentView { .. } => "Content View",
            AnswersEvent::Search { .. } => "Search",
            AnswersEvent::Custom { name, .. } => name,
        }
    }

    pub fn custom_attributes(&self) -> &Attributes {
        match self {
            AnswersEvent::SignUp { custom_attributes, .. }
            | AnswersEvent::Login { custom_attributes, .. }
            | AnswersEvent::Share { custom_attributes, .. }
            | AnswersEvent::Invite { custom_attributes, .. }
            | AnswersEvent::Purchase { custom_attributes, .. }
            | AnswersEvent::LevelStart { custom_attributes, .. }
            | AnswersEvent::LevelEnd { custom_attributes, .. }
            | AnswersEvent::AddToCart { custom_attributes, .. }
            | AnswersEvent::StartCheckout { custom_attributes, .. }
            | AnswersEvent::Rating { custom_attributes, .. }
            | AnswersEvent::ContentView { custom_attributes, .. }
            | AnswersEvent::Search { custom_attributes, .. }
            | AnswersEvent::Custom { custom_attributes, .. } => custom_attributes,
        }
    }

    fn custom_attributes_mut(&mut self) -> &mut Attributes {
        match self {
            AnswersEvent::SignUp { custom_attributes, .. }
            | AnswersEvent::Login { custom_attributes, .. }
            | AnswersEvent::Share { custom_attributes, .. }
            | AnswersEvent::Invite { custom_attributes, .. }
            | AnswersEvent::Purchase { custom_attributes, .. }
            | AnswersEvent::LevelStart { custom_attributes, .. }
            | AnswersEvent::LevelEnd { custom_attributes, .. }
            | AnswersEvent::AddToCart { custom_attributes, .. }
            | AnswersEvent::StartCheckout { custom_attributes, .. }
            | AnswersEvent::Rating { custom_attributes, .. }
            | AnswersEvent::ContentView { custom_attributes, .. }
            | AnswersEvent::Search { custom_attributes, .. }
            | AnswersEvent::Custom { custom_attributes, .. } => custom_attributes,
        }
    }

    /// Adds a custom attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.custom_attributes_mut().insert(key.into(), value.into());
        self
    }
}
