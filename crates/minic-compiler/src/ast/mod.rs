pub mod nodes;
pub mod printer;
pub mod types;
pub mod visitor;

pub use nodes::*;
pub use printer::AstPrinter;
pub use types::TypeName;
pub use visitor::Visitor;
