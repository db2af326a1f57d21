//! Static fallback price data
//!
//! Deterministic substitute used when every live source is exhausted.
//! Never performs I/O and never fails.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use crate::types::TokenQuote;

/// Price returned for ids absent from the table.
pub const DEFAULT_FALLBACK_PRICE: Decimal = dec!(10);

struct FallbackAsset {
    id: &'static str,
    symbol: &'static str,
    name: &'static str,
    image: &'static str,
    price: Decimal,
    market_cap: Decimal,
    change_24h: Decimal,
}

const ASSETS: [FallbackAsset; 20] = [
    FallbackAsset {
        id: "bitcoin",
        symbol: "btc",
        name: "Bitcoin",
        image: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
        price: dec!(65000),
        market_cap: dec!(1_270_000_000_000),
        change_24h: dec!(1.5),
    },
    FallbackAsset {
        id: "ethereum",
        symbol: "eth",
        name: "Ethereum",
        image: "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
        price: dec!(3500),
        market_cap: dec!(420_000_000_000),
        change_24h: dec!(2.1),
    },
    FallbackAsset {
        id: "tether",
        symbol: "usdt",
        name: "Tether",
        image: "https://assets.coingecko.com/coins/images/325/large/Tether.png",
        price: dec!(1),
        market_cap: dec!(95_000_000_000),
        change_24h: dec!(0.01),
    },
    FallbackAsset {
        id: "binancecoin",
        symbol: "bnb",
        name: "BNB",
        image: "https://assets.coingecko.com/coins/images/825/large/bnb-icon2_2x.png",
        price: dec!(570),
        market_cap: dec!(87_000_000_000),
        change_24h: dec!(0.8),
    },
    FallbackAsset {
        id: "solana",
        symbol: "sol",
        name: "Solana",
        image: "https://assets.coingecko.com/coins/images/4128/large/solana.png",
        price: dec!(145),
        market_cap: dec!(65_000_000_000),
        change_24h: dec!(3.2),
    },
    FallbackAsset {
        id: "ripple",
        symbol: "xrp",
        name: "XRP",
        image: "https://assets.coingecko.com/coins/images/44/large/xrp-symbol-white-128.png",
        price: dec!(0.52),
        market_cap: dec!(28_000_000_000),
        change_24h: dec!(-0.8),
    },
    FallbackAsset {
        id: "cardano",
        symbol: "ada",
        name: "Cardano",
        image: "https://assets.coingecko.com/coins/images/975/large/cardano.png",
        price: dec!(0.45),
        market_cap: dec!(16_000_000_000),
        change_24h: dec!(1.2),
    },
    FallbackAsset {
        id: "dogecoin",
        symbol: "doge",
        name: "Dogecoin",
        image: "https://assets.coingecko.com/coins/images/5/large/dogecoin.png",
        price: dec!(0.12),
        market_cap: dec!(17_000_000_000),
        change_24h: dec!(-1.5),
    },
    FallbackAsset {
        id: "polkadot",
        symbol: "dot",
        name: "Polkadot",
        image: "https://assets.coingecko.com/coins/images/12171/large/polkadot.png",
        price: dec!(6.8),
        market_cap: dec!(9_800_000_000),
        change_24h: dec!(2.3),
    },
    FallbackAsset {
        id: "chainlink",
        symbol: "link",
        name: "Chainlink",
        image: "https://assets.coingecko.com/coins/images/877/large/chainlink-new-logo.png",
        price: dec!(14.5),
        market_cap: dec!(8_500_000_000),
        change_24h: dec!(4.1),
    },
    FallbackAsset {
        id: "polygon",
        symbol: "matic",
        name: "Polygon",
        image: "https://assets.coingecko.com/coins/images/4713/large/matic-token-icon.png",
        price: dec!(0.58),
        market_cap: dec!(6_000_000_000),
        change_24h: dec!(1.8),
    },
    FallbackAsset {
        id: "avalanche-2",
        symbol: "avax",
        name: "Avalanche",
        image: "https://assets.coingecko.com/coins/images/12559/large/Avalanche_Circle_RedWhite_Trans.png",
        price: dec!(35),
        market_cap: dec!(13_000_000_000),
        change_24h: dec!(3.5),
    },
    FallbackAsset {
        id: "uniswap",
        symbol: "uni",
        name: "Uniswap",
        image: "https://assets.coingecko.com/coins/images/12504/large/uniswap-uni.png",
        price: dec!(7.2),
        market_cap: dec!(4_500_000_000),
        change_24h: dec!(2.7),
    },
    FallbackAsset {
        id: "dai",
        symbol: "dai",
        name: "Dai",
        image: "https://assets.coingecko.com/coins/images/9956/large/4943.png",
        price: dec!(1),
        market_cap: dec!(5_200_000_000),
        change_24h: dec!(0.02),
    },
    FallbackAsset {
        id: "shiba-inu",
        symbol: "shib",
        name: "Shiba Inu",
        image: "https://assets.coingecko.com/coins/images/11939/large/shiba.png",
        price: dec!(0.000018),
        market_cap: dec!(10_500_000_000),
        change_24h: dec!(-2.1),
    },
    FallbackAsset {
        id: "litecoin",
        symbol: "ltc",
        name: "Litecoin",
        image: "https://assets.coingecko.com/coins/images/2/large/litecoin.png",
        price: dec!(78),
        market_cap: dec!(5_800_000_000),
        change_24h: dec!(1.3),
    },
    FallbackAsset {
        id: "cosmos",
        symbol: "atom",
        name: "Cosmos",
        image: "https://assets.coingecko.com/coins/images/1481/large/cosmos_hub.png",
        price: dec!(8.5),
        market_cap: dec!(3_200_000_000),
        change_24h: dec!(2.9),
    },
    FallbackAsset {
        id: "stellar",
        symbol: "xlm",
        name: "Stellar",
        image: "https://assets.coingecko.com/coins/images/100/large/Stellar_symbol_black_RGB.png",
        price: dec!(0.11),
        market_cap: dec!(3_100_000_000),
        change_24h: dec!(0.5),
    },
    FallbackAsset {
        id: "monero",
        symbol: "xmr",
        name: "Monero",
        image: "https://assets.coingecko.com/coins/images/69/large/monero_logo.png",
        price: dec!(175),
        market_cap: dec!(3_200_000_000),
        change_24h: dec!(1.7),
    },
    FallbackAsset {
        id: "aave",
        symbol: "aave",
        name: "Aave",
        image: "https://assets.coingecko.com/coins/images/12645/large/AAVE.png",
        price: dec!(98),
        market_cap: dec!(1_500_000_000),
        change_24h: dec!(3.8),
    },
];

/// Deterministic token table, padded with rank-derived placeholder
/// entries when `count` exceeds the curated table.
pub fn tokens(count: usize) -> Vec<TokenQuote> {
    let mut out: Vec<TokenQuote> = ASSETS
        .iter()
        .take(count)
        .map(|asset| TokenQuote {
            id: asset.id.to_string(),
            symbol: asset.symbol.to_string(),
            name: asset.name.to_string(),
            image: asset.image.to_string(),
            current_price: asset.price,
            market_cap: asset.market_cap,
            price_change_24h: asset.change_24h,
        })
        .collect();

    while out.len() < count {
        let rank = out.len() + 1;
        let rank_dec = Decimal::from(rank as u64);
        out.push(TokenQuote {
            id: format!("token-{}", rank),
            symbol: format!("tok{}", rank),
            name: format!("Token {}", rank),
            image: "https://placeholder.com/32x32".to_string(),
            current_price: dec!(10) / rank_dec,
            market_cap: dec!(1_000_000_000) / rank_dec,
            price_change_24h: Decimal::ZERO,
        });
    }

    out
}

/// Static price for a known id or symbol, or the fixed default.
pub fn price_for(token_id: &str) -> Decimal {
    let needle = token_id.to_lowercase();
    ASSETS
        .iter()
        .find(|asset| asset.id == needle || asset.symbol == needle)
        .map(|asset| asset.price)
        .unwrap_or(DEFAULT_FALLBACK_PRICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_prefix_is_returned() {
        let toks = tokens(2);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].id, "bitcoin");
        assert_eq!(toks[1].id, "ethereum");
    }

    #[test]
    fn pads_to_requested_count() {
        let toks = tokens(50);
        assert_eq!(toks.len(), 50);
        assert_eq!(toks[20].id, "token-21");
        assert_eq!(toks[20].current_price, dec!(10) / dec!(21));
    }

    #[test]
    fn padding_is_deterministic() {
        assert_eq!(tokens(30)[25].id, tokens(40)[25].id);
    }

    #[test]
    fn known_price_lookup() {
        assert_eq!(price_for("bitcoin"), dec!(65000));
        assert_eq!(price_for("ETH"), dec!(3500));
    }

    #[test]
    fn unknown_id_gets_default() {
        assert_eq!(price_for("definitely-not-a-token"), DEFAULT_FALLBACK_PRICE);
    }
}
