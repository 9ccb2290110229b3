use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;
use rand::seq::SliceRandom;
use raylib::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use photowall::constants::{FPS, RENDER_HEIGHT, RENDER_WIDTH};
use photowall::window::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};
use photowall::window::{Painter, TextureStore};
use photowall::{Gallery, GalleryConfig, Image, Layout, PointerEvent, RendererRegistry, Size};

/// Rotating photo wall
#[derive(Parser, Debug)]
#[command(name = "photowall", version)]
struct Args {
    /// Directory containing the images to rotate
    image_directory: PathBuf,

    /// TOML file with layout and timing; its sources are replaced by the directory's images
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transition style (fade, slide, instant)
    #[arg(long)]
    renderer: Option<String>,

    /// Milliseconds between block changes
    #[arg(long)]
    interval_ms: Option<i64>,

    /// Number of blocks in the generated grid when no config is given
    #[arg(long, default_value_t = 6)]
    blocks: usize,

    /// Pixels between grid blocks
    #[arg(long, default_value_t = 8)]
    gap: u32,

    /// Rotate images in random order instead of by file name
    #[arg(long)]
    shuffle: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // --- Configuration ---
    let mut paths = load_sorted_image_paths(&args.image_directory)?;
    if args.shuffle {
        paths.shuffle(&mut rand::rng());
    }
    let sources: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();

    let mut config = match &args.config {
        Some(path) => GalleryConfig {
            sources,
            ..GalleryConfig::load_from_path(path)?
        },
        None => {
            let canvas = Size::new(RENDER_WIDTH as u32, RENDER_HEIGHT as u32);
            GalleryConfig::new(sources, Layout::grid(args.blocks, canvas, args.gap))
        }
    };
    if let Some(renderer) = args.renderer {
        config.renderer = Some(renderer);
    }
    if let Some(interval_ms) = args.interval_ms {
        config.interval_ms = Some(interval_ms);
    }

    let registry = RendererRegistry::with_builtins();
    let mut gallery = Gallery::new(config, &registry)?.with_click_handler(|click| {
        info!(
            "clicked block {} ({:?}) showing {:?}",
            click.block_index,
            click.block,
            click.image.map(|image| image.id())
        );
    });

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Photo Wall")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Images ---
    let mut textures = TextureStore::new();
    for (source, path) in paths.iter().enumerate() {
        match load_texture_with_exif_rotation(&mut rl, &thread, path) {
            Ok(texture) => {
                let (width, height) = (texture.width() as u32, texture.height() as u32);
                let id = textures.insert(texture);
                match Image::new(id, width, height) {
                    Ok(image) => gallery.image_loaded(source, image)?,
                    Err(e) => gallery.image_failed(source, e.to_string())?,
                }
            }
            Err(e) => gallery.image_failed(source, format!("{e:#}"))?,
        }
    }

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("failed to create render texture: {e}"))?;

    // --- Main Loop ---
    let mut hovering = false;
    while !rl.window_should_close() {
        let dt = Duration::from_secs_f32(rl.get_frame_time());

        // Window pixels -> render texture pixels
        let scale_x = RENDER_WIDTH as f32 / rl.get_screen_width().max(1) as f32;
        let scale_y = RENDER_HEIGHT as f32 / rl.get_screen_height().max(1) as f32;

        let on_screen = rl.is_cursor_on_screen();
        if on_screen != hovering {
            hovering = on_screen;
            gallery.handle_pointer(if hovering { PointerEvent::enter() } else { PointerEvent::leave() });
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            gallery.handle_pointer(PointerEvent::press(mouse.x * scale_x, mouse.y * scale_y));
        }

        // The render texture is never cleared: transitions draw over what is there
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut painter = Painter::new(&mut tmd, &textures);
            gallery.update(dt, &mut painter);
        });

        for event in gallery.drain_events() {
            debug!("{:?}", event);
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);

        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;

        // Render textures are stored upside down
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    info!("{:?}", gallery);
    Ok(())
}
