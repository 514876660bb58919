pub mod desktop;

pub use desktop::{ConfiguredPositionProvider, DesktopCapabilityProvider, GrantPolicy};
