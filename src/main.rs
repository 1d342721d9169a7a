use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use clap::Parser;
use error_iter::ErrorIter as _;
use log::{error, info};
use pixels::{Error, Pixels, SurfaceTexture};
use tilegfx::{
    SCREEN_H, SCREEN_W, Scale, TileGfx,
    demo::DemoScene,
    transport::{FrameRecorder, RgbaTransport, write_ppm},
};
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::KeyCode,
    window::WindowBuilder,
};
use winit_input_helper::WinitInputHelper;

#[derive(Parser, Debug)]
#[command(version, about = "Scrolling tile map preview for the 80x64 panel")]
struct Args {
    /// Render at twice the panel resolution and fold down on flush
    #[arg(long)]
    double: bool,

    /// Preview window zoom
    #[arg(long, default_value_t = 8)]
    scale: u32,

    /// Scroll speed in pixels per frame
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    speed: i32,

    /// Run without a window and write the last flushed frame to this PPM file
    #[arg(long)]
    dump: Option<PathBuf>,

    /// Frames to render before dumping
    #[arg(long, default_value_t = 1, requires = "dump")]
    frames: u32,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let scale = if args.double {
        Scale::Double
    } else {
        Scale::Native
    };
    let mut gfx = TileGfx::init(scale);
    let mut scene = DemoScene::new(args.speed).map_err(|e| Error::UserDefined(e.into()))?;

    if let Some(path) = &args.dump {
        if let Err(err) = run_headless(&mut gfx, &mut scene, args.frames, path) {
            log_error("run_headless", err);
            std::process::exit(1);
        }
        return Ok(());
    }

    let event_loop = EventLoop::new().map_err(|e| Error::UserDefined(Box::new(e)))?;
    let mut input = WinitInputHelper::new();
    let window = {
        let size = LogicalSize::new(SCREEN_W as f64, SCREEN_H as f64);
        let scaled_size = LogicalSize::new(
            (SCREEN_W as u32 * args.scale) as f64,
            (SCREEN_H as u32 * args.scale) as f64,
        );
        WindowBuilder::new()
            .with_title("tilegfx")
            .with_inner_size(scaled_size)
            .with_min_inner_size(size)
            .build(&event_loop)
            .map_err(|e| Error::UserDefined(Box::new(e)))?
    };

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(SCREEN_W as u32, SCREEN_H as u32, surface_texture)?
    };

    let res = event_loop.run(|event, elwt| {
        if let Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } = event
        {
            scene.draw(&mut gfx);
            gfx.flush(&mut RgbaTransport::new(pixels.frame_mut()));
            if let Err(err) = pixels.render() {
                log_error("pixels.render", err);
                elwt.exit();
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(KeyCode::Escape) || input.close_requested() {
                elwt.exit();
                return;
            }

            if let Some(size) = input.window_resized() {
                if let Err(err) = pixels.resize_surface(size.width, size.height) {
                    log_error("pixels.resize_surface", err);
                    elwt.exit();
                    return;
                }
            }

            scene.update();
            window.request_redraw();
        }
    });
    res.map_err(|e| Error::UserDefined(Box::new(e)))
}

fn run_headless(
    gfx: &mut TileGfx,
    scene: &mut DemoScene,
    frames: u32,
    path: &Path,
) -> std::io::Result<()> {
    let mut recorder = FrameRecorder::new();
    for _ in 0..frames.max(1) {
        recorder.frames.clear();
        scene.draw(gfx);
        gfx.flush(&mut recorder);
        scene.update();
    }

    if let Some(frame) = recorder.frames.pop() {
        write_ppm(&frame, BufWriter::new(File::create(path)?))?;
        info!("wrote {}x{} frame to {}", frame.width(), frame.height(), path.display());
    }
    Ok(())
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
