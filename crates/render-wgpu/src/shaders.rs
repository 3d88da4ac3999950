/// WGSL shader for the textured, optionally lit cube instances.
///
/// Vertices are taken to eye space by the per-instance model-view matrix and
/// then projected. Lighting is evaluated in eye space against one light.
pub const CUBE_SHADER: &str = r#"
struct Uniforms {
    projection: mat4x4<f32>,
    light_ambient: vec4<f32>,
    light_diffuse: vec4<f32>,
    light_position: vec4<f32>,
    lighting_enabled: u32,
    _pad0: u32,
    _pad1: u32,
    _pad2: u32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var cube_texture: texture_2d<f32>;
@group(1) @binding(1)
var cube_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) eye_position: vec3<f32>,
    @location(1) eye_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model_view = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let eye = model_view * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.projection * eye;
    out.eye_position = eye.xyz;
    out.eye_normal = (model_view * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(cube_texture, cube_sampler, in.uv);
    if (uniforms.lighting_enabled == 0u) {
        return texel;
    }

    // w = 1: point light at xyz; w = 0: directional light along xyz.
    let to_light = normalize(
        uniforms.light_position.xyz - in.eye_position * uniforms.light_position.w,
    );
    let n = normalize(in.eye_normal);
    let diffuse = max(dot(n, to_light), 0.0);
    let light = uniforms.light_ambient.rgb + uniforms.light_diffuse.rgb * diffuse;
    return vec4<f32>(texel.rgb * min(light, vec3<f32>(1.0)), texel.a);
}
"#;
