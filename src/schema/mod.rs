/// Value types shared by the model builder and the generator.

pub mod symbol;
pub mod word;
