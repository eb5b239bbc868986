use super::*;

/// Tunables for [`UiBehaviors`](crate::UiBehaviors).
///
/// `display_ms` is shared by flash auto-dismissal and notification expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub display_ms: i64,
    pub fade_ms: i64,
    pub card_stagger_ms: i64,
    pub card_animation_ms: i64,
    pub alert_selector: String,
    pub card_selector: String,
    pub image_input_id: String,
    pub confirm_attribute: String,
    pub error_class: String,
    pub validation_message: String,
    pub online_message: String,
    pub offline_message: String,
    pub preview_caption: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            display_ms: 5_000,
            fade_ms: 300,
            card_stagger_ms: 100,
            card_animation_ms: 500,
            alert_selector: ".alert".into(),
            card_selector: ".plant-card, .user-card, .stat-card".into(),
            image_input_id: "image".into(),
            confirm_attribute: "data-confirm".into(),
            error_class: "input-error".into(),
            validation_message: "Please fill in all required fields".into(),
            online_message: "Connection restored".into(),
            offline_message: "No internet connection".into(),
            preview_caption: "Preview of the new image".into(),
        }
    }
}

impl UiConfig {
    pub fn with_display_ms(mut self, display_ms: i64) -> Self {
        self.display_ms = display_ms;
        self
    }

    pub fn with_fade_ms(mut self, fade_ms: i64) -> Self {
        self.fade_ms = fade_ms;
        self
    }

    pub fn with_card_stagger_ms(mut self, card_stagger_ms: i64) -> Self {
        self.card_stagger_ms = card_stagger_ms;
        self
    }

    pub fn with_card_animation_ms(mut self, card_animation_ms: i64) -> Self {
        self.card_animation_ms = card_animation_ms;
        self
    }

    pub fn with_alert_selector(mut self, selector: &str) -> Self {
        self.alert_selector = selector.to_string();
        self
    }

    pub fn with_card_selector(mut self, selector: &str) -> Self {
        self.card_selector = selector.to_string();
        self
    }

    pub fn with_image_input_id(mut self, id: &str) -> Self {
        self.image_input_id = id.to_string();
        self
    }

    pub fn with_confirm_attribute(mut self, name: &str) -> Self {
        self.confirm_attribute = name.to_string();
        self
    }

    pub fn with_error_class(mut self, class_name: &str) -> Self {
        self.error_class = class_name.to_string();
        self
    }

    pub fn with_validation_message(mut self, message: &str) -> Self {
        self.validation_message = message.to_string();
        self
    }

    pub fn with_online_message(mut self, message: &str) -> Self {
        self.online_message = message.to_string();
        self
    }

    pub fn with_offline_message(mut self, message: &str) -> Self {
        self.offline_message = message.to_string();
        self
    }

    pub fn with_preview_caption(mut self, caption: &str) -> Self {
        self.preview_caption = caption.to_string();
        self
    }

    /// Rejects negative durations, empty names and selectors the page model
    /// cannot parse.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("display_ms", self.display_ms),
            ("fade_ms", self.fade_ms),
            ("card_stagger_ms", self.card_stagger_ms),
            ("card_animation_ms", self.card_animation_ms),
        ] {
            if value < 0 {
                return Err(Error::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        for (name, selector) in [
            ("alert_selector", &self.alert_selector),
            ("card_selector", &self.card_selector),
        ] {
            parse_selector_groups(selector)
                .map_err(|err| Error::Config(format!("{name} {selector:?} is invalid: {err}")))?;
        }

        for (name, value) in [
            ("image_input_id", &self.image_input_id),
            ("confirm_attribute", &self.confirm_attribute),
            ("error_class", &self.error_class),
        ] {
            if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
                return Err(Error::Config(format!(
                    "{name} must be a single non-empty token, got {value:?}"
                )));
            }
        }

        Ok(())
    }
}
