//! Stateful wrapper: a graphic whose color depends on its interaction state.

use crate::types::Color;

use super::Graphic;

/// Interaction state of a [`StatefulGraphic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Inactive,
    Focused,
    Selected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatefulGraphic {
    subject: Box<Graphic>,
    state: InteractionState,
    active_color: Color,
    inactive_color: Color,
}

impl StatefulGraphic {
    /// Wrap `subject` in the inactive state; the subject takes `inactive_color`
    pub fn new(subject: Graphic, active_color: Color, inactive_color: Color) -> Self {
        let mut graphic = Self {
            subject: Box::new(subject),
            state: InteractionState::Inactive,
            active_color,
            inactive_color,
        };
        graphic.apply_color();
        graphic
    }

    pub fn subject(&self) -> &Graphic {
        &self.subject
    }

    pub fn subject_mut(&mut self) -> &mut Graphic {
        &mut self.subject
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn set_state(&mut self, state: InteractionState) {
        if self.state != state {
            self.state = state;
            self.apply_color();
        }
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn inactive_color(&self) -> Color {
        self.inactive_color
    }

    pub fn set_active_and_inactive_color(&mut self, color: Color) {
        self.active_color = color;
        self.inactive_color = color;
        self.apply_color();
    }

    /// Color the subject shows in the current state
    pub fn current_color(&self) -> Color {
        match self.state {
            InteractionState::Inactive => self.inactive_color,
            InteractionState::Focused | InteractionState::Selected => self.active_color,
        }
    }

    fn apply_color(&mut self) {
        let color = self.current_color();
        self.subject.set_color(color);
    }
}
