use anchor_lang::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum TradeDirection {
    /// sell base for quote, price moves down
    BaseToQuote,
    /// buy base with quote, price moves up
    QuoteToBase,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct SwapParameters {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}
