use crate::config::{Config, OutputMode};
use crate::filter_buffers::Pixel;
use crate::filter_fx::image_displacement::ImageDisplacementList;
use crate::goom_rand::{GoomRand, NumberRange, RandomSource};
use crate::image_io::write_ppm;
use crate::name_value::format_name_value_pairs;
use crate::parallel::Parallel;
use crate::point2d::Dimensions;
use crate::render::{Frame, HalfBlockRenderer, Renderer};
use crate::terminal::PreviewTerminal;
use crate::zoom_filter_fx::ZoomFilterFx;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

const HUD_ROWS: u16 = 1;
const NUM_DOTS: usize = 6;
const DOT_RADIUS: i32 = 1;
const DOT_SPEED_RANGE: NumberRange<f32> = NumberRange::new(-1.5, 1.5);
const ROTATION_SPEED_FACTOR: f32 = 1.5;
const SPEED_STEP: u32 = 4;

pub fn run(cfg: Config) -> anyhow::Result<()> {
    cfg.validate()?;

    let seed = cfg.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("seed {seed}");
    let mut rand = GoomRand::with_seed(seed);

    let images = match &cfg.resources {
        Some(dir) => ImageDisplacementList::load(dir)
            .with_context(|| format!("load displacement images from {}", dir.display()))?,
        None => ImageDisplacementList::builtin(),
    };

    let dimensions = cfg.dimensions();
    let parallel = Parallel::new(cfg.threads);
    log::info!(
        "{}x{} with {} worker threads",
        dimensions.width,
        dimensions.height,
        parallel.num_threads()
    );

    let mut fx = ZoomFilterFx::new(dimensions, parallel, images, &mut rand);
    fx.start(&mut rand);
    fx.settings_service_mut()
        .set_transform_buffer_lerp_increment(cfg.lerp_increment);
    if cfg.filter_mode.is_some() {
        fx.set_filter_mode(cfg.filter_mode, &mut rand);
    }
    log_mode_change(&fx, cfg.show_params);

    let mut demo = Demo::new(dimensions, fx, &mut rand);
    match cfg.output {
        OutputMode::Preview => run_preview(&cfg, &mut demo, &mut rand),
        OutputMode::Ppm => run_ppm(&cfg, &mut demo, &mut rand),
        OutputMode::None => run_headless(&cfg, &mut demo, &mut rand),
    }
}

/// Moving coloured dots fed through the zoom filter.
struct Demo {
    dimensions: Dimensions,
    fx: ZoomFilterFx,
    dots: Vec<Dot>,
    front: Vec<Pixel>,
    back: Vec<Pixel>,
    frame: u64,
}

struct Dot {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    color: Pixel,
}

impl Demo {
    fn new(dimensions: Dimensions, fx: ZoomFilterFx, rand: &mut dyn RandomSource) -> Self {
        let w = dimensions.width as f32;
        let h = dimensions.height as f32;
        let dots = (0..NUM_DOTS)
            .map(|_| Dot {
                x: rand.rand_in_range(NumberRange::new(0.0, w - 1.0)),
                y: rand.rand_in_range(NumberRange::new(0.0, h - 1.0)),
                dx: rand.rand_in_range(DOT_SPEED_RANGE),
                dy: rand.rand_in_range(DOT_SPEED_RANGE),
                color: [
                    rand.rand_u32_in(64, 256) as u8,
                    rand.rand_u32_in(64, 256) as u8,
                    rand.rand_u32_in(64, 256) as u8,
                    255,
                ],
            })
            .collect();
        Self {
            dimensions,
            fx,
            dots,
            front: vec![[0, 0, 0, 255]; dimensions.size()],
            back: vec![[0, 0, 0, 255]; dimensions.size()],
            frame: 0,
        }
    }

    fn step(&mut self, cfg: &Config, rand: &mut dyn RandomSource) {
        if self.frame > 0 {
            let mode_frames = cfg.mode_frames as u64;
            if self.frame % mode_frames == 0 {
                self.fx.set_filter_mode(cfg.filter_mode, rand);
                log_mode_change(&self.fx, cfg.show_params);
            } else if self.frame % mode_frames == mode_frames / 2 {
                self.fx.settings_service_mut().change_milieu(rand);
            }
        }
        self.fx.update_filter_settings(rand);

        self.draw_dots();
        self.fx.zoom_frame(&self.front, &mut self.back);
        std::mem::swap(&mut self.front, &mut self.back);
        self.frame += 1;
    }

    fn draw_dots(&mut self) {
        let w = self.dimensions.width as i32;
        let h = self.dimensions.height as i32;
        for dot in &mut self.dots {
            dot.x += dot.dx;
            dot.y += dot.dy;
            if dot.x < 0.0 || dot.x > (w - 1) as f32 {
                dot.dx = -dot.dx;
                dot.x = dot.x.clamp(0.0, (w - 1) as f32);
            }
            if dot.y < 0.0 || dot.y > (h - 1) as f32 {
                dot.dy = -dot.dy;
                dot.y = dot.y.clamp(0.0, (h - 1) as f32);
            }
            let (cx, cy) = (dot.x as i32, dot.y as i32);
            for y in (cy - DOT_RADIUS).max(0)..=(cy + DOT_RADIUS).min(h - 1) {
                for x in (cx - DOT_RADIUS).max(0)..=(cx + DOT_RADIUS).min(w - 1) {
                    self.front[(y * w + x) as usize] = dot.color;
                }
            }
        }
    }

    fn pixels(&self) -> &[Pixel] {
        &self.front
    }
}

fn log_mode_change(fx: &ZoomFilterFx, show_params: bool) {
    let service = fx.settings_service();
    log::info!(
        "filter mode {} (previous {})",
        service.current_filter_mode_name(),
        service.previous_filter_mode_name()
    );
    if show_params {
        log::info!("\n{}", format_name_value_pairs(&fx.name_value_params()));
    }
}

fn run_headless(cfg: &Config, demo: &mut Demo, rand: &mut dyn RandomSource) -> anyhow::Result<()> {
    let start = Instant::now();
    for _ in 0..cfg.frames {
        demo.step(cfg, rand);
    }
    let secs = start.elapsed().as_secs_f32();
    log::info!(
        "{} frames in {:.2}s ({:.1} fps)",
        cfg.frames,
        secs,
        cfg.frames as f32 / secs.max(1e-6)
    );
    Ok(())
}

fn run_ppm(cfg: &Config, demo: &mut Demo, rand: &mut dyn RandomSource) -> anyhow::Result<()> {
    std::fs::create_dir_all(&cfg.out_dir)
        .with_context(|| format!("create {}", cfg.out_dir.display()))?;
    let (w, h) = (demo.dimensions.width as usize, demo.dimensions.height as usize);
    for i in 0..cfg.frames {
        demo.step(cfg, rand);
        let path = cfg.out_dir.join(format!("frame_{i:05}.ppm"));
        write_ppm(&path, w, h, demo.pixels().as_flattened())
            .with_context(|| format!("write {}", path.display()))?;
    }
    log::info!("wrote {} frames to {}", cfg.frames, cfg.out_dir.display());
    Ok(())
}

fn run_preview(cfg: &Config, demo: &mut Demo, rand: &mut dyn RandomSource) -> anyhow::Result<()> {
    let mut term = PreviewTerminal::open()?;
    let mut renderer = HalfBlockRenderer::new();
    let mut show_params = false;
    let mut fps = FpsCounter::new();

    for _ in 0..cfg.frames {
        let now = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    if let KeyAction::Quit =
                        handle_key(k.code, k.modifiers, demo, rand, &mut show_params)
                    {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }

        demo.step(cfg, rand);

        let (term_cols, term_rows) = term.size()?;
        let service = demo.fx.settings_service();
        let hud = format!(
            "{} | speed {} | {:.1} fps | n:new m:milieu r:rotate a:after-fx +/-:speed p:params q:quit",
            service.current_filter_mode_name(),
            service.vitesse().vitesse(),
            fps.fps()
        );
        let params = show_params.then(|| format_name_value_pairs(&demo.fx.name_value_params()));
        let frame = Frame {
            term_cols,
            term_rows,
            pixel_width: demo.dimensions.width as usize,
            pixel_height: demo.dimensions.height as usize,
            pixels: demo.pixels(),
            hud: &hud,
            hud_rows: HUD_ROWS,
            panel: params.as_deref(),
        };
        renderer.render(&frame, term.writer())?;
        fps.tick();

        let target = Duration::from_secs_f32(1.0 / cfg.fps.max(1) as f32);
        let elapsed = now.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }
    Ok(())
}

enum KeyAction {
    Continue,
    Quit,
}

fn handle_key(
    code: KeyCode,
    mods: KeyModifiers,
    demo: &mut Demo,
    rand: &mut dyn RandomSource,
    show_params: &mut bool,
) -> KeyAction {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return KeyAction::Quit;
    }
    let service = demo.fx.settings_service_mut();
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Quit,
        KeyCode::Char('n') => {
            service.set_new_random_filter(rand);
            log_mode_change(&demo.fx, false);
        }
        KeyCode::Char('m') => service.change_milieu(rand),
        KeyCode::Char('a') => service.reset_random_after_effects(rand),
        KeyCode::Char('r') => service.toggle_rotation_direction(),
        KeyCode::Char('R') => service.multiply_rotation(ROTATION_SPEED_FACTOR),
        KeyCode::Char('o') => service.turn_off_rotation(),
        KeyCode::Char('e') => service.set_transform_buffer_lerp_to_end(),
        KeyCode::Char(' ') => service.vitesse_mut().toggle_reverse(),
        KeyCode::Char('+') => {
            let vitesse = service.vitesse_mut();
            vitesse.set_vitesse(vitesse.vitesse().saturating_sub(SPEED_STEP));
        }
        KeyCode::Char('-') => service.vitesse_mut().go_slower_by(SPEED_STEP),
        KeyCode::Char('p') => *show_params = !*show_params,
        _ => {}
    }
    KeyAction::Continue
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = self.frames as f32 / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
