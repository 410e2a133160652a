//! Serializer visitors: tree → text/XML. Four independent output
//! formats, all total functions over every `Expression` variant.

pub mod infix;
pub mod mathml;
pub mod palm;
pub mod tex;
