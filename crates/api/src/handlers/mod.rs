pub mod care;
pub mod categories;
pub mod finder;
pub mod plants;
pub mod scanner;
