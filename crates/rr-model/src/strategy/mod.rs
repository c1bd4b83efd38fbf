mod order;
pub use order::OrderMode;

mod syntax;
pub use syntax::PatternSyntax;

mod expansion;
pub use expansion::DirExpansion;
