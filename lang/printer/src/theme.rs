use pretty::DocAllocator;
use pretty::termcolor::{Color, ColorSpec};

use crate::{Alloc, Builder};

/// Colored output for the different syntactic classes.
pub trait ThemeExt<'a> {
    fn keyword(&'a self, text: &str) -> Builder<'a>;
    fn ctor(&'a self, text: &str) -> Builder<'a>;
    fn typ(&'a self, text: &str) -> Builder<'a>;
}

impl<'a> ThemeExt<'a> for Alloc<'a> {
    fn keyword(&'a self, text: &str) -> Builder<'a> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Magenta));
        self.text(text.to_owned()).annotate(spec)
    }

    fn ctor(&'a self, text: &str) -> Builder<'a> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Blue));
        self.text(text.to_owned()).annotate(spec)
    }

    fn typ(&'a self, text: &str) -> Builder<'a> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        self.text(text.to_owned()).annotate(spec)
    }
}
