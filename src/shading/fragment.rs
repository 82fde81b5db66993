use glam::{Vec3, Vec4};

use super::vertex::VertexOutput;
use crate::{texture::TextureImage, uniforms::DrawUniforms};

/// Lit color of a surface point.
///
/// `rgb * (ambient + diffuse * max(N·L, 0))` plus
/// `specular * max(N·H, 0)^shininess` when `specular > 0`. Alpha is
/// untouched.
#[must_use]
pub fn lit_color(
    color: Vec4,
    normal: Vec3,
    world_position: Vec3,
    uniforms: &DrawUniforms,
) -> Vec4 {
    let material = &uniforms.material;
    let n = normal.normalize_or_zero();
    let l = (uniforms.lighting.light_position - world_position)
        .normalize_or_zero();
    let diffuse = n.dot(l).max(0.0);
    let mut rgb =
        color.truncate() * (material.ambient + material.diffuse * diffuse);
    if material.specular > 0.0 {
        let v = (uniforms.lighting.eye_position - world_position)
            .normalize_or_zero();
        let h = (l + v).normalize_or_zero();
        rgb += Vec3::splat(
            material.specular * n.dot(h).max(0.0).powf(material.shininess),
        );
    }
    rgb.extend(color.w)
}

/// Run the fragment stage for one (interpolated) fragment.
#[must_use]
pub fn shade(
    fragment: &VertexOutput,
    uniforms: &DrawUniforms,
    texture: &TextureImage,
) -> Vec4 {
    let settings = &uniforms.settings;
    let base = uniforms.material.base_color_factor;
    if settings.drawing_points {
        return base;
    }
    if settings.show_normals {
        let n = fragment.normal.normalize_or_zero();
        return (n * 0.5 + 0.5).extend(1.0);
    }
    let color = texture.sample(fragment.texcoord) * base;
    if !settings.lighting {
        return color;
    }
    lit_color(color, fragment.normal, fragment.world_position, uniforms)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::{
        texture::SamplerDesc,
        uniforms::{Lighting, Material, Settings},
    };

    fn fragment(normal: Vec3) -> VertexOutput {
        VertexOutput {
            clip_position: Vec4::W,
            world_position: Vec3::ZERO,
            texcoord: Vec2::new(0.25, 0.5),
            normal,
        }
    }

    fn texture() -> TextureImage {
        TextureImage::from_rgba8(2, 1, vec![255, 128, 0, 255, 0, 0, 255, 128])
            .unwrap()
            .with_sampler(SamplerDesc::NEAREST_CLAMP)
    }

    fn uniforms(settings: Settings) -> DrawUniforms {
        DrawUniforms {
            settings,
            material: Material::new(Vec4::new(0.5, 1.0, 1.0, 0.8)),
            ..Default::default()
        }
    }

    #[test]
    fn unlit_color_is_texture_times_base() {
        let tex = texture();
        let frag = fragment(Vec3::Z);
        let color = shade(&frag, &uniforms(Settings::default()), &tex);
        let expected =
            tex.sample(frag.texcoord) * Vec4::new(0.5, 1.0, 1.0, 0.8);
        assert_eq!(color, expected);
    }

    #[test]
    fn lit_color_is_ambient_plus_lambert_toward_default_light() {
        let tex = texture();
        let normal = Vec3::new(0.0, 1.0, 1.0);
        let frag = fragment(normal);
        let u = uniforms(Settings {
            lighting: true,
            ..Default::default()
        });
        assert_eq!(u.lighting, Lighting::default());

        let color = shade(&frag, &u, &tex);
        let base = tex.sample(frag.texcoord) * u.material.base_color_factor;
        let l = Vec3::new(200.0, 100.0, 300.0).normalize();
        let factor = 0.1 + normal.normalize().dot(l).max(0.0);
        assert!(color.truncate().abs_diff_eq(base.truncate() * factor, 1e-6));
        assert_eq!(color.w, base.w);
    }

    #[test]
    fn back_facing_fragment_gets_ambient_only() {
        let tex = TextureImage::white();
        let u = uniforms(Settings {
            lighting: true,
            ..Default::default()
        });
        let color = shade(&fragment(Vec3::new(-2.0, -1.0, -3.0)), &u, &tex);
        assert!(color
            .truncate()
            .abs_diff_eq(Vec3::new(0.05, 0.1, 0.1), 1e-6));
    }

    #[test]
    fn specular_adds_highlight_when_enabled() {
        let tex = TextureImage::white();
        let mut u = uniforms(Settings {
            lighting: true,
            ..Default::default()
        });
        let above = Vec3::new(0.0, 0.0, 10.0);
        u.lighting = Lighting::new(above, above);
        let dull = shade(&fragment(Vec3::Z), &u, &tex);
        u.material = u.material.with_specular(0.5, 8.0);
        let shiny = shade(&fragment(Vec3::Z), &u, &tex);
        assert!(shiny
            .truncate()
            .abs_diff_eq(dull.truncate() + Vec3::splat(0.5), 1e-6));
    }

    #[test]
    fn points_output_base_color_and_normals_debug_encodes_direction() {
        let tex = texture();
        let points = uniforms(Settings {
            drawing_points: true,
            show_normals: true,
            ..Default::default()
        });
        assert_eq!(
            shade(&fragment(Vec3::X), &points, &tex),
            Vec4::new(0.5, 1.0, 1.0, 0.8)
        );

        let normals = uniforms(Settings {
            show_normals: true,
            lighting: true,
            ..Default::default()
        });
        assert_eq!(
            shade(&fragment(Vec3::new(0.0, 0.0, -4.0)), &normals, &tex),
            Vec4::new(0.5, 0.5, 0.0, 1.0)
        );
    }
}
