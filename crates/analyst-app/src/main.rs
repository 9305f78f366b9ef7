//! Headless demo: builds a small plot, drives a few interactions through the
//! event processors and prints the resulting scene.
//!
//! An optional first argument names a JSON file with the widget configuration.

#[cfg(feature = "native")]
use analyst_app::{
    EventParameter, Handler, InteractionManager, NAVIGATION_PROCESSOR, NAVIGATION_RECTANGLE_EVENT,
    ProcessError, navigation_rectangle_processor,
};
#[cfg(feature = "native")]
use analyst_core::{NewVisual, SceneEditor, VisualKind, WidgetConfig, fields};
#[cfg(feature = "native")]
use analyst_render::{NullContext, PaintHooks, PaintManager, PaintResult, RecordingRenderer, RenderLog};
#[cfg(feature = "native")]
use kurbo::{Point, Rect};

/// Figure the zoom handler is written against.
#[cfg(feature = "native")]
#[derive(Debug, Default)]
struct Figure {
    zoom: f64,
}

#[cfg(feature = "native")]
struct DemoScene;

#[cfg(feature = "native")]
impl PaintHooks for DemoScene {
    fn initialize(&mut self, scene: &mut SceneEditor<'_>) -> PaintResult<()> {
        scene.add_visual(NewVisual::new(VisualKind::Grid).named("grid").param("nticks", 5))?;
        let position: Vec<Point> = (0..100)
            .map(|i| {
                let x = i as f64 / 50.0 - 1.0;
                Point::new(x, (x * std::f64::consts::PI * 2.0).sin() * 0.8)
            })
            .collect();
        scene.add_visual(NewVisual::new(VisualKind::Plot).named("sine").param("position", position))?;
        scene.set_data(Some("grid"), fields! { "zoom" => 1.0 });
        Ok(())
    }

    fn finalize(&mut self, scene: &mut SceneEditor<'_>) -> PaintResult<()> {
        scene.add_visual(
            NewVisual::new(VisualKind::Text)
                .named("title")
                .param("text", "sin(2πx)")
                .param("coordinates", Point::new(0.0, 0.9))
                .is_static(true),
        )?;
        Ok(())
    }
}

#[cfg(feature = "native")]
fn load_config() -> Result<WidgetConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            Ok(WidgetConfig::from_json(&std::fs::read_to_string(path)?)?)
        }
        None => Ok(WidgetConfig {
            display_fps: true,
            navigation_rectangle: true,
            ..WidgetConfig::default()
        }),
    }
}

#[cfg(feature = "native")]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let log = RenderLog::new();
    let paint = PaintManager::new(load_config()?, RecordingRenderer::factory(log.clone()), NullContext)
        .with_hooks(DemoScene);
    let mut manager = InteractionManager::new(paint).with_figure(Figure::default());

    manager.paint_manager_mut().initialize_graphics()?;
    manager.paint_manager_mut().resize(800, 600)?;

    manager.add_processor(NAVIGATION_PROCESSOR, navigation_rectangle_processor)?;
    manager.add_processor("zoom", |processor| {
        processor.register(
            "Zoom",
            Handler::external(|bridge, parameter| {
                let factor = parameter.as_scalar().unwrap_or(1.0);
                let zoom = {
                    let figure = bridge
                        .figure_mut::<Figure>()
                        .ok_or_else(|| ProcessError::Handler("figure is not a demo figure".into()))?;
                    figure.zoom = (figure.zoom.max(1.0) * factor).clamp(0.1, 100.0);
                    figure.zoom
                };
                bridge.set_data(Some("grid"), fields! { "zoom" => zoom })?;
                bridge.update();
                Ok(())
            }),
        );
    })?;

    let drag = Rect::new(-0.4, -0.3, 0.2, 0.5);
    manager.process_event(NAVIGATION_RECTANGLE_EVENT, EventParameter::Rect(drag))?;
    manager.paint_manager_mut().paint_frame()?;
    manager.process_none()?;
    manager.process_event("Zoom", EventParameter::Scalar(2.0))?;

    for frame in 0..3 {
        manager.paint_manager_mut().paint_frame()?;
        manager.paint_manager_mut().update_fps(60.0 - frame as f64)?;
    }

    log::info!(
        "Painted {} frame(s); figure zoom is {:?}",
        log.frames(),
        manager.figure::<Figure>().map(|figure| figure.zoom)
    );
    println!("{}", serde_json::to_string_pretty(&manager.paint_manager().serialize()?)?);

    manager.paint_manager_mut().cleanup();
    Ok(())
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting analyst demo");

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
