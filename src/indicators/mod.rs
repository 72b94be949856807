// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// One stateless type per indicator, each implementing `Indicator`. Every
// calculation validates its input, works on a private chronological copy of
// the records and returns results newest-first.
//
// Families:
//   rolling aggregates   sma, bb, cci, dc, adtv, ao, cmf, kc, wr, eom, dpo
//   recursive smoothing  rsi, atr, adx, macd, tsi, fi, trix, mi
//   multi-stage          kst, sr, uo, vi, mfi, ichimoku
//   point-wise           dr, dlr, cr, adi, nvi, obv, obv_mean, vpt, vwap

pub mod adi;
pub mod adtv;
pub mod adx;
pub mod ao;
pub mod atr;
pub mod bb;
pub mod cci;
pub mod cmf;
pub mod cr;
pub mod dc;
pub mod dlr;
pub mod dpo;
pub mod dr;
pub mod eom;
pub mod fi;
pub mod ichimoku;
pub mod kc;
pub mod kst;
pub mod macd;
pub mod mfi;
pub mod mi;
pub mod nvi;
pub mod obv;
pub mod obv_mean;
pub mod rsi;
pub mod sma;
pub mod sr;
pub mod trix;
pub mod tsi;
pub mod uo;
pub mod vi;
pub mod vpt;
pub mod vwap;
pub mod wr;

#[cfg(test)]
pub(crate) mod test_data;

pub use adi::Adi;
pub use adtv::Adtv;
pub use adx::Adx;
pub use ao::Ao;
pub use atr::Atr;
pub use bb::Bb;
pub use cci::Cci;
pub use cmf::Cmf;
pub use cr::Cr;
pub use dc::Dc;
pub use dlr::Dlr;
pub use dpo::Dpo;
pub use dr::Dr;
pub use eom::Eom;
pub use fi::Fi;
pub use ichimoku::Ichimoku;
pub use kc::Kc;
pub use kst::Kst;
pub use macd::Macd;
pub use mfi::Mfi;
pub use mi::Mi;
pub use nvi::Nvi;
pub use obv::Obv;
pub use obv_mean::ObvMean;
pub use rsi::Rsi;
pub use sma::Sma;
pub use sr::Sr;
pub use trix::Trix;
pub use tsi::Tsi;
pub use uo::Uo;
pub use vi::Vi;
pub use vpt::Vpt;
pub use vwap::Vwap;
pub use wr::Wr;

use crate::error::Result;
use crate::indicator::Indicator;
use crate::options::Options;

/// Every indicator the engine ships with.
pub fn roster() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Adi),
        Box::new(Adtv),
        Box::new(Adx),
        Box::new(Ao),
        Box::new(Atr),
        Box::new(Bb),
        Box::new(Cci),
        Box::new(Cmf),
        Box::new(Cr),
        Box::new(Dc),
        Box::new(Dlr),
        Box::new(Dpo),
        Box::new(Dr),
        Box::new(Eom),
        Box::new(Fi),
        Box::new(Ichimoku),
        Box::new(Kc),
        Box::new(Kst),
        Box::new(Macd),
        Box::new(Mfi),
        Box::new(Mi),
        Box::new(Nvi),
        Box::new(Obv),
        Box::new(ObvMean),
        Box::new(Rsi),
        Box::new(Sma),
        Box::new(Sr),
        Box::new(Trix),
        Box::new(Tsi),
        Box::new(Uo),
        Box::new(Vi),
        Box::new(Vpt),
        Box::new(Vwap),
        Box::new(Wr),
    ]
}

/// Options shared by every indicator: where the timestamp lives and how many
/// decimals results keep.
pub(crate) struct Common {
    pub date_time_key: String,
    pub precision: u32,
}

impl Common {
    pub fn read(options: &Options) -> Result<Self> {
        Ok(Self {
            date_time_key: options.date_time_key()?,
            precision: options.precision()?,
        })
    }
}
