pub mod style_switcher;

pub use style_switcher::StyleSwitcher;
