//! Token id to exchange symbol mapping

/// Converts an aggregator token id (e.g. `bitcoin`) to the ticker
/// symbol exchanges key their pairs on. Unknown ids are uppercased
/// as-is, matching how most exchanges name long-tail listings.
pub fn token_id_to_symbol(token_id: &str) -> String {
    match token_id {
        "bitcoin" => "BTC",
        "ethereum" => "ETH",
        "binancecoin" => "BNB",
        "ripple" => "XRP",
        "cardano" => "ADA",
        "solana" => "SOL",
        "polkadot" => "DOT",
        "dogecoin" => "DOGE",
        "avalanche-2" => "AVAX",
        "chainlink" => "LINK",
        "polygon" => "MATIC",
        "litecoin" => "LTC",
        "bitcoin-cash" => "BCH",
        "uniswap" => "UNI",
        "stellar" => "XLM",
        _ => return token_id.to_uppercase(),
    }
    .to_string()
}
