mod glyphs;
pub mod grid;
pub mod primes;

pub use grid::render_sieve;
pub use primes::primes_up_to;
