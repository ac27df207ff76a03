//! Scale builder
//!
//! Derives the three linear scales of the chart from the current data
//! extents. All three share the plot area: the X scale spans its width, both
//! Y scales span its height and are flipped at draw time
//! (`pixel_y = chart_height - scale(value)`).

use curve_core::{LinePoint, Result, SeriesAccessor, SeriesKey};

use crate::chartkit::LinearScale;

/// `[min, max]` of the values, or `None` when there are none.
///
/// NaN entries are skipped by the min/max folds.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None if v.is_nan() => None,
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Builds the X, line-Y and area-Y scales
pub struct ScaleBuilder;

impl ScaleBuilder {
    /// Scale over `[min, max]` of `values` onto `[0, length]`.
    /// Empty input gives the degenerate domain `[0, 0]`.
    pub fn linear(values: impl IntoIterator<Item = f64>, length: f64) -> LinearScale {
        let (min, max) = extent(values).unwrap_or((0.0, 0.0));
        LinearScale::new().domain(min, max).range(0.0, length)
    }

    /// X scale over the line points' x extent
    pub fn x(points: &[LinePoint], width: f64) -> LinearScale {
        Self::linear(points.iter().map(|p| p.x), width)
    }

    /// Line-Y scale over the line points' y extent
    pub fn line_y(points: &[LinePoint], height: f64) -> LinearScale {
        Self::linear(points.iter().map(|p| p.y), height)
    }

    /// Area-Y scale from `min(0, smallest single value)` to the largest
    /// per-record sum across all keys.
    pub fn area_y<R, A>(
        records: &[R],
        keys: &[SeriesKey],
        accessor: &A,
        height: f64,
    ) -> Result<LinearScale>
    where
        A: SeriesAccessor<R> + ?Sized,
    {
        let mut min = 0.0_f64;
        let mut max: Option<f64> = None;

        for (index, record) in records.iter().enumerate() {
            let mut sum = 0.0;
            for key in keys {
                let value = crate::stack::read_value(accessor, record, key, index)?;
                min = min.min(value);
                sum += value;
            }
            max = Some(max.map_or(sum, |m| m.max(sum)));
        }

        Ok(LinearScale::new()
            .domain(min, max.unwrap_or(0.0))
            .range(0.0, height))
    }
}

/// The three scales of one render pass.
///
/// Built together from one data snapshot and one plot size, so pointer
/// resolution never mixes scales from different passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub x: LinearScale,
    pub line_y: LinearScale,
    pub area_y: LinearScale,
}

impl ChartScales {
    pub fn build<R, A>(
        points: &[LinePoint],
        records: &[R],
        keys: &[SeriesKey],
        accessor: &A,
        width: f64,
        height: f64,
    ) -> Result<Self>
    where
        A: SeriesAccessor<R> + ?Sized,
    {
        Ok(Self {
            x: ScaleBuilder::x(points, width),
            line_y: ScaleBuilder::line_y(points, height),
            area_y: ScaleBuilder::area_y(records, keys, accessor, height)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chartkit::Scale;
    use curve_core::{series_keys, InvalidInput};

    fn points() -> Vec<LinePoint> {
        vec![
            LinePoint::new(0.0, 10.0),
            LinePoint::new(2.0, 20.0),
            LinePoint::new(4.0, 30.0),
        ]
    }

    fn by_index(record: &[f64; 2], key: &SeriesKey) -> Option<f64> {
        match key.as_str() {
            "a" => Some(record[0]),
            "b" => Some(record[1]),
            _ => None,
        }
    }

    #[test]
    fn test_extent() {
        assert_eq!(extent([3.0, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent([f64::NAN, 2.0]), Some((2.0, 2.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }

    #[test]
    fn test_x_and_line_scales() {
        let x = ScaleBuilder::x(&points(), 400.0);
        assert_eq!(x.domain_bounds(), (0.0, 4.0));
        assert_eq!(x.range_bounds(), (0.0, 400.0));
        assert_eq!(x.scale(2.0), 200.0);

        let y = ScaleBuilder::line_y(&points(), 250.0);
        assert_eq!(y.domain_bounds(), (10.0, 30.0));
        assert_eq!(y.scale(30.0), 250.0);
    }

    #[test]
    fn test_empty_data_gives_finite_scale() {
        let x = ScaleBuilder::x(&[], 400.0);
        assert_eq!(x.domain_bounds(), (0.0, 0.0));
        assert!(x.scale(0.0).is_finite());
        assert!(x.invert(123.0).is_finite());
    }

    #[test]
    fn test_area_scale_sums_and_clamps_to_zero() {
        let records = [[2.0, 3.0], [4.0, 9.0], [1.0, 1.0]];
        let keys = series_keys(&["a", "b"]);
        let scale = ScaleBuilder::area_y(&records, &keys, &by_index, 100.0).unwrap();
        assert_eq!(scale.domain_bounds(), (0.0, 13.0));
    }

    #[test]
    fn test_area_scale_keeps_negative_minimum() {
        let records = [[2.0, -3.0], [4.0, 1.0]];
        let keys = series_keys(&["a", "b"]);
        let scale = ScaleBuilder::area_y(&records, &keys, &by_index, 100.0).unwrap();
        assert_eq!(scale.domain_bounds(), (-3.0, 5.0));
    }

    #[test]
    fn test_area_scale_rejects_missing_value() {
        let records = [[2.0, 3.0]];
        let keys = series_keys(&["a", "zzz"]);
        let err = ScaleBuilder::area_y(&records, &keys, &by_index, 100.0).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::MissingSeriesValue { key: "zzz".into(), index: 0 }
        );
    }

    #[test]
    fn test_scales_built_together() {
        let records = [[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let keys = series_keys(&["a", "b"]);
        let scales = ChartScales::build(&points(), &records, &keys, &by_index, 400.0, 200.0).unwrap();
        assert_eq!(scales.x.range_bounds(), (0.0, 400.0));
        assert_eq!(scales.line_y.range_bounds(), (0.0, 200.0));
        assert_eq!(scales.area_y.domain_bounds(), (0.0, 6.0));
    }
}
