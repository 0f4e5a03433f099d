use clap::ValueEnum;

/// How modules are identified in the generated bundle
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ModuleIds {
    /// Dense integers in discovery order; the entry is 0
    #[value(name = "numeric")]
    Numeric,

    /// Paths relative to the project directory
    #[value(name = "path")]
    Path,
}
