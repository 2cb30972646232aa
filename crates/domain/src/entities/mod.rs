//! Domain entities - Objects with identity and lifecycle

mod view_state;

pub use view_state::{
    ACCENT_COLOR, ButtonTheme, DirectionsForm, MUTED_COLOR, MapType, TransportMode, ViewMode,
    ViewState,
};
