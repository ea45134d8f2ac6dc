pub mod freecurrency;

pub use freecurrency::FreeCurrencyProvider;
