use pretty::DocAllocator;
use pretty::termcolor::ColorSpec;

pub const DEFAULT_WIDTH: usize = 100;

pub type Alloc<'a> = pretty::Arena<'a, ColorSpec>;
pub type Builder<'a> = pretty::DocBuilder<'a, Alloc<'a>, ColorSpec>;

#[derive(Debug, Clone)]
pub struct PrintCfg {
    /// Width of the output terminal/device
    pub width: usize,
    /// Print the De-Bruijn representation of variables
    pub de_bruijn: bool,
    /// How many spaces of indentation are used
    pub indent: isize,
}

impl Default for PrintCfg {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, de_bruijn: false, indent: 4 }
    }
}

/// Operator precedences, from loosest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Precedence of top-level expressions
    Exp,
    /// Precedence of arrows and equalities
    Ops,
    /// Precedence of function application
    App,
    /// Precedence of atoms
    Atom,
}

pub trait Print {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        self.print_prec(cfg, alloc, Precedence::Exp)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        self.print(cfg, alloc)
    }

    fn print_to_string(&self, cfg: Option<&PrintCfg>) -> String
    where
        Self: Sized,
    {
        let alloc = Alloc::new();
        let cfg = cfg.cloned().unwrap_or_default();
        let mut buf = Vec::new();
        let doc = self.print(&cfg, &alloc);
        doc.1.render(cfg.width, &mut buf).expect("Failed to print to string");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Print with the De-Bruijn representation of variables; used in trace logs.
    fn print_trace(&self) -> String
    where
        Self: Sized,
    {
        let cfg = PrintCfg { de_bruijn: true, ..Default::default() };
        self.print_to_string(Some(&cfg))
    }
}

impl<T: Print> Print for Box<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        (**self).print(cfg, alloc)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        (**self).print_prec(cfg, alloc, prec)
    }
}

impl<T: Print> Print for &T {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        (**self).print(cfg, alloc)
    }

    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        (**self).print_prec(cfg, alloc, prec)
    }
}

impl<T: Print> Print for Option<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        match self {
            Some(inner) => inner.print(cfg, alloc),
            None => alloc.nil(),
        }
    }
}

impl<T: Print> Print for Vec<T> {
    fn print<'a>(&'a self, cfg: &PrintCfg, alloc: &'a Alloc<'a>) -> Builder<'a> {
        let sep = alloc.text(", ");
        alloc.intersperse(self.iter().map(|x| x.print(cfg, alloc)), sep)
    }
}
