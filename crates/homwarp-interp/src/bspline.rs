//! Centered B-spline evaluation and the poles of the direct filter.

/// Maximum supported interpolation order.
///
/// Poles of the direct B-spline filter are tabulated up to this degree.
pub const MAX_ORDER: usize = 11;

/// Poles of the direct B-spline filter for the given degree.
///
/// Degrees 0 and 1 interpolate directly and have no poles. Degrees 2 to 5
/// use the closed-form expressions, degrees 6 to 11 tabulated roots of the
/// discrete B-spline symbol. The caller must have validated
/// `order <= MAX_ORDER`.
pub(crate) fn filter_poles(order: usize) -> Vec<f64> {
    match order {
        0 | 1 => vec![],
        2 => vec![8f64.sqrt() - 3.0],
        3 => vec![3f64.sqrt() - 2.0],
        4 => vec![
            (664.0 - 438976f64.sqrt()).sqrt() + 304f64.sqrt() - 19.0,
            (664.0 + 438976f64.sqrt()).sqrt() - 304f64.sqrt() - 19.0,
        ],
        5 => vec![
            (67.5 - 4436.25f64.sqrt()).sqrt() + 26.25f64.sqrt() - 6.5,
            (67.5 + 4436.25f64.sqrt()).sqrt() - 26.25f64.sqrt() - 6.5,
        ],
        6 => vec![
            -0.488_294_589_303_044_76,
            -0.081_679_271_076_237_51,
            -0.001_414_151_808_325_817_7,
        ],
        7 => vec![
            -0.535_280_430_796_438_2,
            -0.122_554_615_192_326_69,
            -0.009_148_694_809_608_277,
        ],
        8 => vec![
            -0.574_686_909_248_765_4,
            -0.163_035_269_297_280_94,
            -0.023_632_294_694_844_85,
            -0.000_153_821_310_641_690_9,
        ],
        9 => vec![
            -0.607_997_389_168_625_8,
            -0.201_750_520_193_153_24,
            -0.043_222_608_540_481_75,
            -0.002_121_306_903_180_818_4,
        ],
        10 => vec![
            -0.636_550_663_969_423_9,
            -0.238_182_798_377_573_28,
            -0.065_727_033_228_308_55,
            -0.007_528_194_675_548_691,
            -0.000_016_982_762_823_274_664,
        ],
        11 => vec![
            -0.661_266_068_900_734_7,
            -0.272_180_349_294_785_9,
            -0.089_759_599_793_713_31,
            -0.016_669_627_366_234_656,
            -0.000_510_557_534_446_502_06,
        ],
        _ => unreachable!("order must be validated against MAX_ORDER"),
    }
}

/// Evaluate the `order + 1` non-zero weights of the centered B-spline of
/// the given degree at `x`, writing them into `weights`.
///
/// Returns the leftmost integer tap index, so `weights[k]` is the basis
/// value at tap `jmin + k`. Uses the triangular Cox-de Boor recurrence,
/// raising the degree in place from 0 to `order`.
pub(crate) fn bspline_weights(order: usize, x: f64, weights: &mut [f64]) -> isize {
    debug_assert_eq!(weights.len(), order + 1);
    let jmin = (x + (order as f64 + 1.0) / 2.0).floor() as isize - order as isize;
    weights[0] = 1.0;
    for d in 1..=order {
        let df = d as f64;
        let half_support = (df + 1.0) / 2.0;
        for k in (0..=d).rev() {
            let u = x - (jmin + k as isize) as f64 - (order - d) as f64 / 2.0;
            let left = if k > 0 { weights[k - 1] } else { 0.0 };
            let right = if k < d { weights[k] } else { 0.0 };
            weights[k] = ((half_support + u) * left + (half_support - u) * right) / df;
        }
    }
    jmin
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_nearest() {
        let mut w = [0.0; 1];
        let jmin = bspline_weights(0, 2.3, &mut w);
        assert_eq!(jmin, 2);
        assert_eq!(w[0], 1.0);

        let jmin = bspline_weights(0, 2.7, &mut w);
        assert_eq!(jmin, 3);
    }

    #[test]
    fn weights_linear() {
        let mut w = [0.0; 2];
        let jmin = bspline_weights(1, 2.25, &mut w);
        assert_eq!(jmin, 2);
        assert_relative_eq!(w[0], 0.75, max_relative = 1e-12);
        assert_relative_eq!(w[1], 0.25, max_relative = 1e-12);
    }

    #[test]
    fn weights_cubic_at_integer() {
        let mut w = [0.0; 4];
        let jmin = bspline_weights(3, 2.0, &mut w);
        assert_eq!(jmin, 1);
        assert_relative_eq!(w[0], 1.0 / 6.0, max_relative = 1e-12);
        assert_relative_eq!(w[1], 4.0 / 6.0, max_relative = 1e-12);
        assert_relative_eq!(w[2], 1.0 / 6.0, max_relative = 1e-12);
        assert_relative_eq!(w[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn weights_partition_of_unity() {
        for order in 0..=MAX_ORDER {
            let mut w = vec![0.0; order + 1];
            for &x in &[-3.7, -0.5, 0.0, 0.4, 1.999, 57.123] {
                bspline_weights(order, x, &mut w);
                let sum: f64 = w.iter().sum();
                assert_relative_eq!(sum, 1.0, max_relative = 1e-12);
                assert!(w.iter().all(|&v| v >= -1e-12));
            }
        }
    }

    #[test]
    fn poles_lie_in_unit_interval() {
        for order in 0..=MAX_ORDER {
            for z in filter_poles(order) {
                assert!(z > -1.0 && z < 0.0, "pole {} of order {}", z, order);
            }
        }
    }
}
