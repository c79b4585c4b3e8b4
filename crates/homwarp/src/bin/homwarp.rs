use argh::FromArgs;
use std::path::PathBuf;
use std::time::Instant;

use homwarp::{
    interp::{BoundaryExtension, MAX_ORDER},
    io::{read_image_any_planar, write_image_any_planar},
    warp::{warp_homography, warp_homography_geom, Geometry, Homography, WarpConfig},
};

#[derive(FromArgs)]
/// Homographic transformation of an image using B-spline interpolation
struct Args {
    /// homography: 9 matrix coefficients ("h11 h12 h13; h21 h22 h23; h31 h32 h33")
    #[argh(positional)]
    homography: String,

    /// filename of the input image
    #[argh(positional)]
    input: PathBuf,

    /// filename of the output image
    #[argh(positional)]
    output: PathBuf,

    /// order of interpolation (integer between 0 and 11, default 11)
    #[argh(option, default = "MAX_ORDER")]
    order: usize,

    /// boundary extension (constant, periodic, hsymmetric, wsymmetric)
    #[argh(option, default = "String::from(\"hsymmetric\")")]
    boundary: String,

    /// relative precision (default 6; eps >= 1 means 10^-eps)
    #[argh(option, default = "6.0")]
    precision: f64,

    /// compute on exact (0, default) or enlarged domain (1)
    #[argh(option, default = "0")]
    enlarge: u8,

    /// area of output, wxh or wxh+x0+y0 or auto or center
    #[argh(option)]
    geometry: Option<String>,
}

// eps >= 1 is shorthand for 10^-eps
fn fix_precision(eps: f64) -> f64 {
    if eps >= 1.0 {
        10f64.powf(-eps)
    } else {
        eps
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let h: Homography = args.homography.parse()?;
    let boundary: BoundaryExtension = args.boundary.parse()?;
    let config = WarpConfig {
        order: args.order,
        boundary,
        precision: fix_precision(args.precision),
        enlarged_domain: args.enlarge != 0,
    };

    let src = read_image_any_planar(&args.input)?;

    let start = Instant::now();
    let dst = match args.geometry {
        Some(ref g) => {
            let geometry: Geometry = g.parse()?;
            let window = geometry.resolve(&h, src.size())?;
            warp_homography_geom(&src, &window, &h, &config)?
        }
        None => warp_homography(&src, &h, &config)?,
    };
    log::info!("interpolation: {:.3} s", start.elapsed().as_secs_f64());

    write_image_any_planar(&args.output, &dst)?;

    Ok(())
}
