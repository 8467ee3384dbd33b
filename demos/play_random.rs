use catcher_gym::{Action, Catcher, CatcherConfig, Environment, RenderFrame, Space};
use minifb::{Key, Window, WindowOptions};
use tracing_subscriber::EnvFilter;

const CELL: u32 = 32;

fn rgba_to_argb(px: &[u8]) -> u32 {
    ((px[3] as u32) << 24) | ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | (px[2] as u32)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mut env = Catcher::new(CatcherConfig::default().with_seed(123))?;
    tracing::info!("{}", env.description()?);

    let side = env.grid_size() * CELL as usize;
    let mut window = Window::new("catcher-gym: random policy", side, side, WindowOptions::default())?;
    window.limit_update_rate(Some(std::time::Duration::from_millis(125)));

    let actions = env.action_space();
    let mut rng = rand::thread_rng();
    let mut buffer: Vec<u32> = vec![0; side * side];
    let (mut caught, mut missed) = (0u32, 0u32);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let action = Action::try_from(actions.sample(&mut rng))?;
        let step = env.update(action)?;
        if step.is_over {
            if step.reward > 0.0 { caught += 1 } else { missed += 1 }
            tracing::info!(caught, missed, "episode finished");
            env.reset()?;
        }

        if let RenderFrame::Pixels { width, height, data } = env.render_pixels(CELL) {
            for (dst, px) in buffer.iter_mut().zip(data.chunks_exact(4)) {
                *dst = rgba_to_argb(px);
            }
            window.update_with_buffer(&buffer, width as usize, height as usize)?;
        }
    }
    Ok(())
}
