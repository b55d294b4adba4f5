pub mod images;
pub mod pool;
pub mod rounds;
