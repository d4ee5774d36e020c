#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coin {
    pub symbol: &'static str,
    pub coingecko_id: &'static str,
    pub display_name: &'static str,
}

pub const COINS: &[Coin] = &[
    Coin {
        symbol: "btc",
        coingecko_id: "bitcoin",
        display_name: "Bitcoin",
    },
    Coin {
        symbol: "eth",
        coingecko_id: "ethereum",
        display_name: "Ethereum",
    },
    Coin {
        symbol: "bnb",
        coingecko_id: "binancecoin",
        display_name: "BNB",
    },
    Coin {
        symbol: "xrp",
        coingecko_id: "ripple",
        display_name: "XRP",
    },
    Coin {
        symbol: "sol",
        coingecko_id: "solana",
        display_name: "Solana",
    },
];

/// Case-insensitive lookup in the supported coin catalog.
pub fn coin_by_symbol(symbol: &str) -> Option<&'static Coin> {
    let needle = symbol.to_ascii_lowercase();
    COINS.iter().find(|coin| coin.symbol == needle)
}
