//! Crypto board.

pub mod board;

pub use board::CryptoBoard;
