mod formatter;
mod report;

pub use formatter::{JsonOutput, OutputFormatter};
pub use report::{Binding, DeclarationRef, DuplicateReport, UnitReport};
