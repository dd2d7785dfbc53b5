//! Camera orientation, floor and layer selection.

use serde::Serialize;

/// Yaw step of a single rotate gesture, in degrees.
pub const YAW_STEP: i32 = 45;

/// Perspective pivot offset used while looking at the building from the side.
pub const ELEVATION_PIVOT: f64 = -40.0;

/// Camera tilt. Only the two discrete tilts are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pitch {
    #[default]
    Normal,
    /// Looking straight down at the plan.
    TopDown,
}

impl Pitch {
    #[must_use]
    pub fn degrees(self) -> i32 {
        match self {
            Pitch::Normal => 0,
            Pitch::TopDown => -90,
        }
    }
}

/// Everything that decides what the viewer shows.
///
/// Transitions consume the state and return the next one; a transition
/// that does not apply returns the state unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewState {
    /// Degrees about the vertical axis. Unbounded; see [`ViewState::normalized_yaw`].
    pub yaw: i32,
    pub pitch: Pitch,
    /// Vertical perspective pivot, in building units.
    pub pivot_y: f64,
    /// Level of the floor shown in plan mode; `None` stacks every floor.
    pub floor: Option<usize>,
    /// Active layer; empty means only unlayered walls pass.
    pub layer: String,
}

impl ViewState {
    /// Yaw in `[0, 360)`.
    #[must_use]
    pub fn normalized_yaw(&self) -> i32 {
        self.yaw.rem_euclid(360)
    }

    #[must_use]
    pub fn is_top_down(&self) -> bool {
        self.pitch == Pitch::TopDown
    }

    #[must_use]
    pub fn is_plan(&self) -> bool {
        self.floor.is_some()
    }

    #[must_use]
    pub fn rotate_left(mut self) -> Self {
        if !self.is_top_down() {
            self.yaw += YAW_STEP;
        }
        self
    }

    #[must_use]
    pub fn rotate_right(mut self) -> Self {
        if !self.is_top_down() {
            self.yaw -= YAW_STEP;
        }
        self
    }

    #[must_use]
    pub fn tilt_to_top(self) -> Self {
        if self.is_top_down() {
            return self;
        }
        self.reset_pitch(Pitch::TopDown)
    }

    #[must_use]
    pub fn tilt_to_normal(self) -> Self {
        if !self.is_top_down() {
            return self;
        }
        self.reset_pitch(Pitch::Normal)
    }

    /// Sets the pitch unconditionally, moving the pivot with it and
    /// snapping yaw back to a whole turn.
    #[must_use]
    pub fn reset_pitch(mut self, pitch: Pitch) -> Self {
        self.pitch = pitch;
        self.pivot_y = match pitch {
            Pitch::Normal => ELEVATION_PIVOT,
            Pitch::TopDown => 0.0,
        };
        self.yaw -= self.yaw % 360;
        self
    }

    /// Applies a space separated, case-insensitive view name such as
    /// `"front left"` or `"top"`. Unknown words are ignored.
    #[must_use]
    pub fn with_view(mut self, view: &str) -> Self {
        let view = view.to_lowercase();
        let has = |word: &str| view.split(' ').any(|w| w == word);

        let mut yaw = self.yaw;
        let mut pitch = self.pitch;
        if has("front") {
            yaw = if has("left") {
                YAW_STEP
            } else if has("right") {
                -YAW_STEP
            } else {
                0
            };
        } else if has("back") {
            yaw = if has("left") {
                180 - YAW_STEP
            } else if has("right") {
                180 + YAW_STEP
            } else {
                180
            };
        } else if has("left") {
            yaw = 90;
        } else if has("right") {
            yaw = 270;
        }
        if has("top") {
            pitch = Pitch::TopDown;
            yaw = 0;
        }

        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Switches between the stacked view (`None`) and a single floor plan.
    ///
    /// Entering plan mode from the stacked view resets the camera; moving
    /// between floors keeps it. Leaving plan mode always resets it, with the
    /// pivot raised to `building_height`.
    #[must_use]
    pub fn with_floor(mut self, floor: Option<usize>, building_height: f64) -> Self {
        if self.floor == floor {
            return self;
        }
        let from_stacked = self.floor.is_none();
        self.floor = floor;
        if floor.is_some() {
            if from_stacked {
                self.yaw = 0;
                self.pitch = Pitch::Normal;
                self.pivot_y = ELEVATION_PIVOT;
            }
        } else {
            self.yaw = 0;
            self.pitch = Pitch::Normal;
            self.pivot_y = building_height;
        }
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: &str) -> Self {
        layer.clone_into(&mut self.layer);
        self
    }
}
