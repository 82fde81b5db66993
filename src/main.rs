//! Off-screen demo: a procedural skinned cylinder swaying on a joint chain,
//! rendered for a fixed number of frames.
//!
//! Usage: `skinview [options.toml]`

use std::path::Path;

use glam::{Mat4, Vec4};
use skinview::{
    animation::{Animation, AnimationPlayer},
    camera::{projection, FlyCamera},
    gpu::{render_context::RenderContext, texture::RenderTarget},
    mesh::primitives::skinned_cylinder,
    options::Options,
    renderer::{
        bone_lines, debug_uniforms, joint_points, DrawCall, DrawState,
        GpuMesh, Renderer,
    },
    skeleton::Skeleton,
    texture::TextureImage,
    uniforms::{DrawUniforms, JointMatrices, Lighting, Transforms},
    util::frame_timing::FrameTiming,
    SkinviewError,
};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
const FRAMES: u32 = 120;
const FRAME_DT: f32 = 1.0 / 60.0;

const JOINT_COUNT: usize = 4;
const CYLINDER_HEIGHT: f32 = 2.0;

/// Joint points and bone lines drawn over the mesh.
struct Overlay {
    points: GpuMesh,
    lines: GpuMesh,
    point_state: DrawState,
    line_state: DrawState,
    color: Vec4,
    uniforms: DrawUniforms,
}

impl Overlay {
    fn new(
        context: &RenderContext,
        renderer: &Renderer,
        skeleton: &Skeleton,
        base: &DrawUniforms,
        color: Vec4,
    ) -> Result<Self, SkinviewError> {
        let uniforms = debug_uniforms(base, color);
        Ok(Self {
            points: renderer.upload_mesh(context, &joint_points(skeleton)),
            lines: renderer.upload_mesh(context, &bone_lines(skeleton)),
            point_state: renderer
                .create_draw_state(context, None, &uniforms)?,
            line_state: renderer
                .create_draw_state(context, None, &uniforms)?,
            color,
            uniforms,
        })
    }

    fn update(
        &mut self,
        context: &RenderContext,
        skeleton: &Skeleton,
        base: &DrawUniforms,
    ) {
        let (device, queue) = (&context.device, &context.queue);
        self.points.update(device, queue, &joint_points(skeleton));
        self.lines.update(device, queue, &bone_lines(skeleton));
        self.uniforms = debug_uniforms(base, self.color);
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    if let Err(e) = pollster::block_on(run()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SkinviewError> {
    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };

    let context = RenderContext::headless(WIDTH, HEIGHT).await?;
    let mut renderer = Renderer::new(&context, context.format())?;
    renderer.set_clear_color(options.shading.clear_color);

    let mut skeleton =
        Skeleton::chain(JOINT_COUNT, CYLINDER_HEIGHT / JOINT_COUNT as f32)?;
    let mesh =
        skinned_cylinder(0.25, CYLINDER_HEIGHT, 24, 16, JOINT_COUNT as u32);
    mesh.validate_joints(skeleton.len())?;

    let mut player = AnimationPlayer::new(
        vec![Animation::sway(&skeleton, 0.6, 2.0)?],
        options.animation.mode,
    );
    player.speed = options.animation.speed;
    let _ = player.select(options.animation.clip);

    let mut camera = FlyCamera::from_options(&options.camera);
    let image = TextureImage::checkerboard(
        64,
        8,
        [235, 235, 235, 255],
        [40, 90, 200, 255],
    );
    let texture = renderer.upload_texture(&context, "Checkerboard", &image);
    let gpu_mesh = renderer.upload_mesh(&context, &mesh);

    let mut uniforms = DrawUniforms {
        transforms: Transforms::new(
            projection(&options.camera, context.aspect()),
            camera.view_matrix(),
            Mat4::IDENTITY,
        ),
        joints: JointMatrices::from_slice(&skeleton.joint_matrices())?,
        settings: options.mesh_settings(gpu_mesh.is_skinned()),
        material: options.shading.material(Vec4::ONE),
        lighting: Lighting::new(
            options.shading.light_position(),
            camera.position(),
        ),
    };
    let mesh_state =
        renderer.create_draw_state(&context, Some(&texture), &uniforms)?;

    let mut overlay = if options.debug.show_joints {
        Some(Overlay::new(
            &context,
            &renderer,
            &skeleton,
            &uniforms,
            Vec4::from(options.debug.joint_color),
        )?)
    } else {
        None
    };

    let target =
        RenderTarget::new(&context.device, WIDTH, HEIGHT, context.format());
    let mut timing = FrameTiming::new();
    log::info!(
        "rendering {FRAMES} frames of '{}' at {WIDTH}x{HEIGHT}",
        mesh.name
    );

    for _ in 0..FRAMES {
        player.advance(FRAME_DT);
        player.apply(&mut skeleton);
        uniforms.joints.set(&skeleton.joint_matrices())?;

        if let Some(overlay) = overlay.as_mut() {
            overlay.update(&context, &skeleton, &uniforms);
        }

        let mut draws = vec![DrawCall {
            mesh: &gpu_mesh,
            state: &mesh_state,
            uniforms: &uniforms,
        }];
        if let Some(overlay) = overlay.as_ref() {
            draws.push(DrawCall {
                mesh: &overlay.lines,
                state: &overlay.line_state,
                uniforms: &overlay.uniforms,
            });
            draws.push(DrawCall {
                mesh: &overlay.points,
                state: &overlay.point_state,
                uniforms: &overlay.uniforms,
            });
        }

        renderer.render_to_target(&context, &target, &draws)?;
        let _ = timing.tick();
    }

    let pixels = target.read_pixels(&context.device, &context.queue)?;
    let center = ((HEIGHT / 2 * WIDTH + WIDTH / 2) * 4) as usize;
    log::info!(
        "{} frames, {:.2} ms/frame ({:.1} fps), clip time {:.2}s",
        timing.frames(),
        timing.average_frame_ms(),
        timing.fps(),
        player.time()
    );
    if let Some(rgba) = pixels.get(center..center + 4) {
        log::info!("center pixel rgba {rgba:?}");
    }
    Ok(())
}
