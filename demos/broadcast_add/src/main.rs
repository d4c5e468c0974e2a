use argh::FromArgs;

use lanewise::element::{try_element, Add};
use lanewise::tensor::{CpuAllocator, Tensor2};

#[derive(FromArgs)]
/// Adds a broadcast operand to a matrix. Run with RUST_LOG=debug to see the lane width.
struct Args {
    /// number of rows of the output
    #[argh(option, default = "4")]
    rows: usize,

    /// number of columns of the output
    #[argh(option, default = "8")]
    cols: usize,

    /// broadcast a column of shape [rows, 1] instead of a row of shape [1, cols]
    #[argh(switch)]
    broadcast_rows: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let x = Tensor2::<f32, _>::from_shape_fn([args.rows, args.cols], CpuAllocator, |[r, c]| {
        (r * args.cols + c) as f32
    })?;

    let operand = if args.broadcast_rows {
        Tensor2::<f32, _>::from_shape_fn([args.rows, 1], CpuAllocator, |[r, _]| {
            1000.0 * (r + 1) as f32
        })?
    } else {
        Tensor2::<f32, _>::from_shape_fn([1, args.cols], CpuAllocator, |[_, c]| {
            1000.0 * (c + 1) as f32
        })?
    };
    log::info!("adding {:?} to {:?}", operand.shape.dims(), x.shape.dims());

    let mut out = Tensor2::<f32, _>::zeros([args.rows, args.cols], CpuAllocator)?;
    try_element(Add, out.view_mut(), [x.view(), operand.view()])?;

    for row in out.as_slice().chunks(args.cols.max(1)) {
        println!("{:?}", row);
    }

    Ok(())
}
