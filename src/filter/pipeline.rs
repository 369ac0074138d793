//! Local Laplacian filter driving the per-coefficient pyramid rebuilds.
//!
//! For every level `l` of the output Laplacian pyramid and every coefficient
//! `(x, y)` on it:
//! 1. map the coefficient to full resolution (`2^l · (x, y)`),
//! 2. crop the neighbourhood the coefficient depends on from the input,
//! 3. remap the crop around the Gaussian value `G[l](x, y)`,
//! 4. build a small Laplacian pyramid of the crop (`l + 1` levels) with the
//!    crop bounds as its sub-window,
//! 5. copy its level-`l` coefficient into the output.
//!
//! The residual is the Gaussian residual of the input; collapsing the output
//! pyramid gives the filtered image. Levels run one after the other; the rows
//! of a level are independent and run on the rayon pool when the `parallel`
//! feature is enabled.
use super::params::FilterParams;
use crate::diagnostics::{
    elapsed_ms, FilterReport, InputDescriptor, LevelFilterReport, PyramidStage, TimingBreakdown,
};
use crate::error::PyramidError;
use crate::image::{Pixel, PixelBuffer};
use crate::pyramid::{GaussianPyramid, LaplacianPyramid, SubWindow};
use crate::remap::RemappingFunction;
use log::{debug, info};
use std::time::Instant;

/// Full-resolution neighbourhood a level-`l` Laplacian coefficient depends
/// on: a square of side `3·(2^(l+2) - 1)` centred on the coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelFootprint {
    pub level: usize,
    pub size: usize,
    pub radius: usize,
}

impl LevelFootprint {
    pub fn for_level(level: usize) -> Self {
        let size = 3 * ((1usize << (level + 2)) - 1);
        Self {
            level,
            size,
            radius: size / 2,
        }
    }
}

/// Filtered image together with the pyramid it was collapsed from.
#[derive(Clone, Debug)]
pub struct FilterOutput<P: Pixel> {
    pub image: PixelBuffer<P>,
    pub pyramid: LaplacianPyramid<P>,
    pub report: FilterReport,
}

#[derive(Clone, Debug)]
pub struct LocalLaplacianFilter {
    params: FilterParams,
    remap: RemappingFunction,
}

impl LocalLaplacianFilter {
    pub fn new(params: FilterParams) -> Result<Self, PyramidError> {
        params.validate()?;
        Ok(Self {
            remap: RemappingFunction::new(params.alpha, params.beta),
            params,
        })
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Filter `input` and return the result at the same size.
    pub fn apply<P: Pixel>(&self, input: &PixelBuffer<P>) -> Result<PixelBuffer<P>, PyramidError> {
        Ok(self.run(input)?.image)
    }

    /// Filter `input`, keeping the output pyramid and a run report.
    pub fn run<P: Pixel>(&self, input: &PixelBuffer<P>) -> Result<FilterOutput<P>, PyramidError> {
        if input.is_empty() {
            return Err(PyramidError::EmptyImage {
                w: input.w,
                h: input.h,
            });
        }
        let total_start = Instant::now();
        let num_levels =
            LaplacianPyramid::<P>::level_count(input.w, input.h, self.params.residual_size);
        info!(
            "local laplacian: {}x{} ({} ch), {} levels, alpha={} beta={} sigma_r={}",
            input.w,
            input.h,
            P::CHANNELS,
            num_levels,
            self.params.alpha,
            self.params.beta,
            self.params.sigma_r
        );
        let mut timings = TimingBreakdown::default();

        let gauss =
            timings.measure("gaussian_pyramid", || GaussianPyramid::build(input, num_levels))?;
        let gauss_ms = timings.stage_ms("gaussian_pyramid").unwrap_or_default();

        let mut output = LaplacianPyramid::blank(input.w, input.h, num_levels)?;
        output.set_level(num_levels, gauss.level(num_levels)?.clone())?;

        let mut levels = Vec::with_capacity(num_levels);
        let mut levels_ms = 0.0;
        for level in 0..num_levels {
            let footprint = LevelFootprint::for_level(level);
            let label = format!("level_{level}");
            let coefficients =
                timings.measure(label.as_str(), || self.filter_level(input, &gauss, footprint))?;
            let elapsed = timings.stage_ms(&label).unwrap_or_default();
            debug!(
                "level {} ({}x{}), footprint {}x{}: {:.1} ms",
                level + 1,
                coefficients.w,
                coefficients.h,
                footprint.size,
                footprint.size,
                elapsed
            );
            levels.push(LevelFilterReport {
                level_index: level,
                width: coefficients.w,
                height: coefficients.h,
                footprint: footprint.size,
                coefficients: coefficients.w * coefficients.h,
                elapsed_ms: elapsed,
            });
            levels_ms += elapsed;
            output.set_level(level, coefficients)?;
        }

        let pyramid = output.finish()?;
        let image = timings.measure("reconstruct", || pyramid.reconstruct());
        timings.total_ms = elapsed_ms(total_start);
        info!("local laplacian finished in {:.1} ms", timings.total_ms);

        let report = FilterReport {
            input: InputDescriptor {
                width: input.w,
                height: input.h,
                channels: P::CHANNELS,
                pyramid_levels: num_levels,
            },
            params: self.params,
            gaussian: PyramidStage::from_levels(gauss.levels(), gauss_ms),
            output_pyramid: PyramidStage::from_levels(pyramid.levels(), levels_ms),
            levels,
            timings,
        };
        Ok(FilterOutput {
            image,
            pyramid,
            report,
        })
    }

    fn filter_level<P: Pixel>(
        &self,
        input: &PixelBuffer<P>,
        gauss: &GaussianPyramid<P>,
        footprint: LevelFootprint,
    ) -> Result<PixelBuffer<P>, PyramidError> {
        let reference = gauss.level(footprint.level)?;
        let rows = self.filter_rows(input, reference, footprint)?;
        Ok(PixelBuffer {
            w: reference.w,
            h: reference.h,
            data: rows.concat(),
        })
    }

    fn filter_rows<P: Pixel>(
        &self,
        input: &PixelBuffer<P>,
        reference: &PixelBuffer<P>,
        footprint: LevelFootprint,
    ) -> Result<Vec<Vec<P>>, PyramidError> {
        #[cfg(feature = "parallel")]
        {
            if self.params.parallel {
                use rayon::prelude::*;
                return (0..reference.h)
                    .into_par_iter()
                    .map(|y| self.filter_row(input, reference, footprint, y))
                    .collect();
            }
        }
        (0..reference.h)
            .map(|y| self.filter_row(input, reference, footprint, y))
            .collect()
    }

    fn filter_row<P: Pixel>(
        &self,
        input: &PixelBuffer<P>,
        reference: &PixelBuffer<P>,
        footprint: LevelFootprint,
        y: usize,
    ) -> Result<Vec<P>, PyramidError> {
        (0..reference.w)
            .map(|x| self.coefficient(input, reference.get(x, y), footprint, x, y))
            .collect()
    }

    /// One output coefficient at `(x, y)` of level `footprint.level`.
    fn coefficient<P: Pixel>(
        &self,
        input: &PixelBuffer<P>,
        reference: P,
        footprint: LevelFootprint,
        x: usize,
        y: usize,
    ) -> Result<P, PyramidError> {
        let level = footprint.level;
        let full_x = x << level;
        let full_y = y << level;
        let (x0, x1) = clipped_span(full_x, footprint.radius, input.w);
        let (y0, y1) = clipped_span(full_y, footprint.radius, input.h);

        let region = input.crop(x0, x1, y0, y1);
        let remapped = self
            .remap
            .evaluate_region(&region, reference, self.params.sigma_r);

        let window = SubWindow::new(y0, y1 - 1, x0, x1 - 1)?;
        let local = LaplacianPyramid::build_region(&remapped, level + 1, window)?;
        Ok(local
            .level(level)?
            .get((full_x - x0) >> level, (full_y - y0) >> level))
    }
}

/// Half-open `[center - radius, center + radius + 1)` clipped to `[0, len)`.
#[inline]
fn clipped_span(center: usize, radius: usize, len: usize) -> (usize, usize) {
    (
        center.saturating_sub(radius),
        (center + radius + 1).min(len),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_grows_geometrically() {
        assert_eq!(LevelFootprint::for_level(0).size, 9);
        assert_eq!(LevelFootprint::for_level(0).radius, 4);
        assert_eq!(LevelFootprint::for_level(1).size, 21);
        assert_eq!(LevelFootprint::for_level(1).radius, 10);
        assert_eq!(LevelFootprint::for_level(3).size, 93);
    }

    #[test]
    fn spans_are_clipped_to_the_image() {
        assert_eq!(clipped_span(2, 4, 10), (0, 7));
        assert_eq!(clipped_span(8, 4, 10), (4, 10));
        assert_eq!(clipped_span(0, 4, 1), (0, 1));
    }

    #[test]
    fn empty_input_is_rejected() {
        let filter = LocalLaplacianFilter::new(FilterParams::default()).unwrap();
        let img = PixelBuffer::<f64>::new(0, 4);
        assert!(matches!(
            filter.apply(&img),
            Err(PyramidError::EmptyImage { w: 0, h: 4 })
        ));
    }

    #[test]
    fn invalid_params_are_rejected_up_front() {
        assert!(LocalLaplacianFilter::new(FilterParams::new(1.0, 1.0, -0.1)).is_err());
        assert!(matches!(
            LocalLaplacianFilter::new(FilterParams::new(-0.5, 1.0, 0.3)),
            Err(PyramidError::InvalidParameter { name: "alpha", .. })
        ));
    }

    #[test]
    fn harvested_coefficients_match_full_pyramid_without_remap() {
        // With an identity remap each neighbourhood pyramid must reproduce the
        // full-image Laplacian coefficient exactly.
        let img = PixelBuffer::from_fn(40, 37, |x, y| {
            0.5 + 0.25 * ((x as f64) * 0.9).sin() * ((y as f64) * 0.45).cos()
        });
        let params = FilterParams::new(1.0, 1.0, 0.5)
            .with_residual_size(8)
            .with_parallel(false);
        let filter = LocalLaplacianFilter::new(params).unwrap();
        let out = filter.run(&img).unwrap();
        let reference = LaplacianPyramid::build(&img, out.pyramid.num_levels()).unwrap();
        for (k, (a, b)) in out
            .pyramid
            .levels()
            .iter()
            .zip(reference.levels())
            .enumerate()
        {
            assert!(a.max_abs_diff(b) < 1e-9, "level {k} differs");
        }
    }
}
