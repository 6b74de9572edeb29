//! Observing-condition bins and the constraints an observation carries.
//!
//! Every bin enum is declared from most to least restrictive, so the derived
//! `Ord` doubles as "is at least as restrictive as". `min` over a collection
//! therefore yields the most restrictive requirement.
//!
//! # Shapes
//!
//! A [`Conditions`] value either holds one bin per field or an array of bins
//! per field (one entry per time slot). Mixing the two, or arrays of different
//! lengths, is rejected at construction.

use chrono::{DateTime, Utc};
use qtty::Degrees;

use super::error::ConditionsError;
use super::timingwindow::TimingWindow;

macro_rules! define_bin {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Numeric value of the bin.
            pub fn value(self) -> f64 {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }
    };
}

define_bin!(
    /// Sky background percentile.
    SkyBackground { SB20 = 0.2, SB50 = 0.5, SB80 = 0.8, SBAny = 1.0 }
);

define_bin!(
    /// Cloud cover percentile.
    CloudCover { CC50 = 0.5, CC70 = 0.7, CC80 = 0.8, CCAny = 1.0 }
);

define_bin!(
    /// Image quality percentile.
    ImageQuality { IQ20 = 0.2, IQ70 = 0.7, IQ85 = 0.85, IQAny = 1.0 }
);

define_bin!(
    /// Water vapour percentile.
    WaterVapor { WV20 = 0.2, WV50 = 0.5, WV80 = 0.8, WVAny = 1.0 }
);

define_bin!(
    /// Strehl ratio requirement.
    Strehl { S00 = 0.0, S02 = 0.2, S04 = 0.4, S06 = 0.6, S08 = 0.8, S10 = 1.0 }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElevationType {
    #[default]
    None,
    HourAngle,
    Airmass,
}

/// A single value or one value per time slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bins<T> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Copy> Bins<T> {
    pub fn scalar(value: T) -> Self {
        Bins::Scalar(value)
    }

    pub fn array(values: Vec<T>) -> Self {
        Bins::Array(values)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Bins::Scalar(_))
    }

    /// 1 for scalars, the element count for arrays.
    pub fn len(&self) -> usize {
        match self {
            Bins::Scalar(_) => 1,
            Bins::Array(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Bins::Array(v) if v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        let (scalar, array) = match self {
            Bins::Scalar(v) => (Some(*v), &[][..]),
            Bins::Array(v) => (None, v.as_slice()),
        };
        scalar.into_iter().chain(array.iter().copied())
    }
}

fn same_shape(shapes: &[(bool, usize)]) -> Result<(), ConditionsError> {
    let Some(&(scalar, len)) = shapes.first() else {
        return Ok(());
    };
    if shapes.iter().any(|&(s, _)| s != scalar) {
        return Err(ConditionsError::MixedShapes);
    }
    if !scalar && shapes.iter().any(|&(_, l)| l != len) {
        return Err(ConditionsError::LengthMismatch);
    }
    Ok(())
}

/// Sky conditions, either required by an observation or forecast.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conditions {
    cc: Bins<CloudCover>,
    iq: Bins<ImageQuality>,
    sb: Bins<SkyBackground>,
    wv: Bins<WaterVapor>,
}

impl Conditions {
    /// # Errors
    ///
    /// - `MixedShapes` if some fields are scalars and others arrays
    /// - `LengthMismatch` if the arrays differ in length
    pub fn new(
        cc: Bins<CloudCover>,
        iq: Bins<ImageQuality>,
        sb: Bins<SkyBackground>,
        wv: Bins<WaterVapor>,
    ) -> Result<Self, ConditionsError> {
        same_shape(&[
            (cc.is_scalar(), cc.len()),
            (iq.is_scalar(), iq.len()),
            (sb.is_scalar(), sb.len()),
            (wv.is_scalar(), wv.len()),
        ])?;
        Ok(Self { cc, iq, sb, wv })
    }

    /// Scalar conditions; always well-shaped.
    pub fn scalar(cc: CloudCover, iq: ImageQuality, sb: SkyBackground, wv: WaterVapor) -> Self {
        Self {
            cc: Bins::Scalar(cc),
            iq: Bins::Scalar(iq),
            sb: Bins::Scalar(sb),
            wv: Bins::Scalar(wv),
        }
    }

    pub fn least_restrictive() -> Self {
        Self::scalar(
            CloudCover::CCAny,
            ImageQuality::IQAny,
            SkyBackground::SBAny,
            WaterVapor::WVAny,
        )
    }

    /// Field-wise minimum over every value of every conditions in `conditions`.
    ///
    /// Arrays are flattened, so scalar and array conditions may be mixed here.
    /// An empty input yields [`Conditions::least_restrictive`].
    pub fn most_restrictive_conditions(conditions: &[Conditions]) -> Conditions {
        let cc = conditions.iter().flat_map(|c| c.cc.iter()).min();
        let iq = conditions.iter().flat_map(|c| c.iq.iter()).min();
        let sb = conditions.iter().flat_map(|c| c.sb.iter()).min();
        let wv = conditions.iter().flat_map(|c| c.wv.iter()).min();
        Self::scalar(
            cc.unwrap_or(CloudCover::CCAny),
            iq.unwrap_or(ImageQuality::IQAny),
            sb.unwrap_or(SkyBackground::SBAny),
            wv.unwrap_or(WaterVapor::WVAny),
        )
    }

    pub fn cc(&self) -> &Bins<CloudCover> {
        &self.cc
    }

    pub fn iq(&self) -> &Bins<ImageQuality> {
        &self.iq
    }

    pub fn sb(&self) -> &Bins<SkyBackground> {
        &self.sb
    }

    pub fn wv(&self) -> &Bins<WaterVapor> {
        &self.wv
    }

    /// Array length, or 1 for scalar conditions.
    pub fn len(&self) -> usize {
        self.cc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cc.is_empty()
    }
}

/// A weather variant: forecast IQ/CC and wind, starting at `start_time`.
///
/// Wind speed is in m/s.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    pub start_time: DateTime<Utc>,
    iq: Bins<ImageQuality>,
    cc: Bins<CloudCover>,
    wind_dir: Bins<Degrees>,
    wind_spd: Bins<f64>,
}

impl Variant {
    /// # Errors
    ///
    /// - `MixedShapes` if exactly one of `iq` and `cc` is an array
    /// - `LengthMismatch` if the wind arrays disagree with each other, or with
    ///   `iq`/`cc` when those are arrays
    pub fn new(
        start_time: DateTime<Utc>,
        iq: Bins<ImageQuality>,
        cc: Bins<CloudCover>,
        wind_dir: Bins<Degrees>,
        wind_spd: Bins<f64>,
    ) -> Result<Self, ConditionsError> {
        same_shape(&[(iq.is_scalar(), iq.len()), (cc.is_scalar(), cc.len())])?;
        let mut lengths = vec![wind_dir.len(), wind_spd.len()];
        if !cc.is_scalar() {
            lengths.extend([cc.len(), iq.len()]);
        }
        if lengths.windows(2).any(|w| w[0] != w[1]) {
            return Err(ConditionsError::LengthMismatch);
        }
        Ok(Self {
            start_time,
            iq,
            cc,
            wind_dir,
            wind_spd,
        })
    }

    pub fn iq(&self) -> &Bins<ImageQuality> {
        &self.iq
    }

    pub fn cc(&self) -> &Bins<CloudCover> {
        &self.cc
    }

    pub fn wind_dir(&self) -> &Bins<Degrees> {
        &self.wind_dir
    }

    pub fn wind_spd(&self) -> &Bins<f64> {
        &self.wind_spd
    }
}

/// What an observation needs in order to be performed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    pub conditions: Conditions,
    pub elevation_type: ElevationType,
    pub elevation_min: f64,
    pub elevation_max: f64,
    pub timing_windows: Vec<TimingWindow>,
    pub strehl: Option<Strehl>,
}

impl Constraints {
    /// Airmass bounds applied when no elevation constraint is given.
    pub const DEFAULT_AIRMASS_ELEVATION_MIN: f64 = 1.0;
    pub const DEFAULT_AIRMASS_ELEVATION_MAX: f64 = 2.3;

    /// Constraints with the default airmass window and no timing windows.
    pub fn new(conditions: Conditions) -> Self {
        Self {
            conditions,
            elevation_type: ElevationType::Airmass,
            elevation_min: Self::DEFAULT_AIRMASS_ELEVATION_MIN,
            elevation_max: Self::DEFAULT_AIRMASS_ELEVATION_MAX,
            timing_windows: Vec::new(),
            strehl: None,
        }
    }

    pub fn with_elevation(mut self, elevation_type: ElevationType, min: f64, max: f64) -> Self {
        self.elevation_type = elevation_type;
        self.elevation_min = min;
        self.elevation_max = max;
        self
    }

    pub fn with_timing_windows(mut self, windows: Vec<TimingWindow>) -> Self {
        self.timing_windows = windows;
        self
    }

    pub fn with_strehl(mut self, strehl: Strehl) -> Self {
        self.strehl = Some(strehl);
        self
    }

    /// The effective elevation window: `(type, min, max)`.
    ///
    /// An elevation type of `None` falls back to the default airmass bounds.
    pub fn elevation_bounds(&self) -> (ElevationType, f64, f64) {
        match self.elevation_type {
            ElevationType::None => (
                ElevationType::Airmass,
                Self::DEFAULT_AIRMASS_ELEVATION_MIN,
                Self::DEFAULT_AIRMASS_ELEVATION_MAX,
            ),
            t => (t, self.elevation_min, self.elevation_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bins_order_from_most_restrictive() {
        assert!(CloudCover::CC50 < CloudCover::CCAny);
        assert!(ImageQuality::IQ20 < ImageQuality::IQ85);
        assert_eq!(ImageQuality::IQ85.value(), 0.85);
        assert_eq!(Strehl::S00.value(), 0.0);
    }

    #[test]
    fn most_restrictive_of_nothing_is_least_restrictive() {
        assert_eq!(
            Conditions::most_restrictive_conditions(&[]),
            Conditions::least_restrictive()
        );
    }

    #[test]
    fn most_restrictive_mixes_scalars_and_arrays() {
        let scalar = Conditions::scalar(
            CloudCover::CC70,
            ImageQuality::IQ85,
            SkyBackground::SBAny,
            WaterVapor::WV50,
        );
        let array = Conditions::new(
            Bins::array(vec![CloudCover::CCAny, CloudCover::CC50]),
            Bins::array(vec![ImageQuality::IQ70, ImageQuality::IQAny]),
            Bins::array(vec![SkyBackground::SB80, SkyBackground::SB50]),
            Bins::array(vec![WaterVapor::WVAny, WaterVapor::WVAny]),
        )
        .unwrap();
        let result = Conditions::most_restrictive_conditions(&[scalar, array]);
        assert_eq!(
            result,
            Conditions::scalar(
                CloudCover::CC50,
                ImageQuality::IQ70,
                SkyBackground::SB50,
                WaterVapor::WV50,
            )
        );
    }

    #[test]
    fn mixed_shapes_rejected() {
        let err = Conditions::new(
            Bins::scalar(CloudCover::CC50),
            Bins::array(vec![ImageQuality::IQ70]),
            Bins::scalar(SkyBackground::SB50),
            Bins::scalar(WaterVapor::WV50),
        );
        assert_eq!(err, Err(ConditionsError::MixedShapes));
    }

    #[test]
    fn ragged_arrays_rejected() {
        let err = Conditions::new(
            Bins::array(vec![CloudCover::CC50, CloudCover::CC70]),
            Bins::array(vec![ImageQuality::IQ70]),
            Bins::array(vec![SkyBackground::SB50, SkyBackground::SB50]),
            Bins::array(vec![WaterVapor::WV50, WaterVapor::WV50]),
        );
        assert_eq!(err, Err(ConditionsError::LengthMismatch));
    }

    #[test]
    fn len_counts_array_entries() {
        let c = Conditions::new(
            Bins::array(vec![CloudCover::CC50; 3]),
            Bins::array(vec![ImageQuality::IQ70; 3]),
            Bins::array(vec![SkyBackground::SB50; 3]),
            Bins::array(vec![WaterVapor::WV50; 3]),
        )
        .unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(Conditions::least_restrictive().len(), 1);
    }

    #[test]
    fn variant_checks_wind_lengths() {
        let t = Utc.with_ymd_and_hms(2020, 7, 1, 10, 0, 0).unwrap();
        let ok = Variant::new(
            t,
            Bins::scalar(ImageQuality::IQ70),
            Bins::scalar(CloudCover::CC50),
            Bins::scalar(Degrees::new(270.0)),
            Bins::scalar(5.0),
        );
        assert!(ok.is_ok());

        let bad = Variant::new(
            t,
            Bins::array(vec![ImageQuality::IQ70, ImageQuality::IQ70]),
            Bins::array(vec![CloudCover::CC50, CloudCover::CC50]),
            Bins::array(vec![Degrees::new(270.0)]),
            Bins::array(vec![5.0]),
        );
        assert_eq!(bad, Err(ConditionsError::LengthMismatch));
    }

    #[test]
    fn elevation_none_uses_airmass_defaults() {
        let c = Constraints::new(Conditions::least_restrictive()).with_elevation(
            ElevationType::None,
            0.0,
            0.0,
        );
        assert_eq!(c.elevation_bounds(), (ElevationType::Airmass, 1.0, 2.3));
    }
}
