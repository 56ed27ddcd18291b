//! Text analysis and TF-IDF vectorization.

pub mod sparse;
pub mod stopwords;
pub mod tfidf;
pub mod tokenizer;


pub use sparse::SparseVector;
pub use tfidf::{TfidfVectorizer, VectorSpace};
