use arrow::array::Float64Array;
use bband_data::Partitions;
use bband_types::{BandError, Period};

use crate::impl_::bollinger::BollingerBands;
use crate::traits::{BandArrays, BandBackend};

/// Gathers each partition into a contiguous series, slides the window row
/// by row and scatters the results back to the original row positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EagerBackend;

impl BandBackend for EagerBackend {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn compute(
        &self,
        values: &Float64Array,
        partitions: &Partitions,
        period: Period,
        std_multiplier: f64,
    ) -> Result<BandArrays, BandError> {
        let len = values.len();
        if partitions.num_rows() != len {
            return Err(BandError::computation(format!(
                "partitions cover {} rows, value column has {len}",
                partitions.num_rows()
            )));
        }

        let bands = BollingerBands::new(period, std_multiplier);
        let observed: Vec<Option<f64>> = values.iter().collect();
        let mut middle = vec![None; len];
        let mut upper = vec![None; len];
        let mut lower = vec![None; len];

        for rows in partitions.iter() {
            let series: Vec<Option<f64>> = rows.iter().map(|&row| observed[row]).collect();
            let result = bands.compute_all(&series);

            for (pos, &row) in rows.iter().enumerate() {
                middle[row] = result.middle[pos];
                upper[row] = result.upper[pos];
                lower[row] = result.lower[pos];
            }
        }

        Ok(BandArrays {
            middle: Float64Array::from(middle),
            upper: Float64Array::from(upper),
            lower: Float64Array::from(lower),
        })
    }
}
