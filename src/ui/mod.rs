pub mod borders;
pub mod theme;
pub mod tui;

pub mod components {
    pub mod control_buttons;
}

pub mod panels {
    pub mod now_playing;
}
