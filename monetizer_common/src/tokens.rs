//! Supported token catalog shared between client and server.
//!
//! The dashboard lists a fixed set of tokens per chain. Balances are read
//! on-chain by the wallet front end; this module only knows which tokens exist,
//! where their contracts live and a reference USD price used for valuation.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Ethereum mainnet chain id.
pub const ETHEREUM: u64 = 1;
/// BNB Smart Chain chain id.
pub const BSC: u64 = 56;

/// Symbols of the supported tokens.
#[allow(missing_docs)]
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, Hash, Eq, PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum TokenSymbol {
    USDT,
    WBTC,
    SHIB,
    BabyDoge,
    BTC,
    #[serde(rename = "USD.Z")]
    #[strum(serialize = "USD.Z")]
    USDZ,
    LitterCoin,
}

impl TokenSymbol {
    /// Reference USD price used to value balances.
    pub fn reference_price(&self) -> f64 {
        match self {
            TokenSymbol::WBTC | TokenSymbol::BTC => 67_000.0,
            TokenSymbol::SHIB => 0.00003,
            _ => 1.0,
        }
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Token symbol.
    pub symbol: TokenSymbol,
    /// Chain the contract is deployed on.
    pub chain_id: u64,
    /// ERC-20 contract address, `None` while the deployment is unknown.
    pub contract_address: Option<String>,
    /// Reference USD price.
    pub reference_price: f64,
}

const CATALOG: &[(TokenSymbol, u64, Option<&str>)] = &[
    (
        TokenSymbol::USDT,
        ETHEREUM,
        Some("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
    ),
    (
        TokenSymbol::WBTC,
        ETHEREUM,
        Some("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
    ),
    (
        TokenSymbol::SHIB,
        BSC,
        Some("0x2859e4544C4bB03966803b044a93563Bd2D0DD4D"),
    ),
    (
        TokenSymbol::BabyDoge,
        BSC,
        Some("0xc748673057861a797275CD8A068AbB95A902e8de"),
    ),
    (
        TokenSymbol::BTC,
        BSC,
        Some("0x7130d2A12B9BCbFAe4f2634d864A1Ee1Ce3Ead9c"),
    ),
    (TokenSymbol::USDZ, BSC, None),
    (TokenSymbol::LitterCoin, BSC, None),
];

/// Returns the tokens supported on `chain_id`, in catalog order.
///
/// Unknown chains yield an empty list.
pub fn tokens_for_chain(chain_id: u64) -> Vec<Token> {
    CATALOG
        .iter()
        .filter(|(_, chain, _)| *chain == chain_id)
        .map(|(symbol, chain, contract)| Token {
            symbol: *symbol,
            chain_id: *chain,
            contract_address: contract.map(String::from),
            reference_price: symbol.reference_price(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_split_by_chain() {
        assert_eq!(tokens_for_chain(ETHEREUM).len(), 2);
        assert_eq!(tokens_for_chain(BSC).len(), 5);
        assert!(tokens_for_chain(137).is_empty());
    }

    #[test]
    fn placeholder_contracts_are_absent() {
        let bsc = tokens_for_chain(BSC);
        let usdz = bsc.iter().find(|t| t.symbol == TokenSymbol::USDZ).unwrap();
        assert_eq!(usdz.contract_address, None);
        let json = serde_json::to_value(usdz).unwrap();
        assert_eq!(json["symbol"], "USD.Z");
        assert_eq!(json["chainId"], 56);
    }

    #[test]
    fn reference_prices() {
        assert_eq!(TokenSymbol::BTC.reference_price(), 67_000.0);
        assert_eq!(TokenSymbol::USDT.reference_price(), 1.0);
        assert_eq!("babydoge".parse::<TokenSymbol>().unwrap(), TokenSymbol::BabyDoge);
    }
}
