//! GLSL source assembly for the GPU compute collaborator.
//!
//! The GPU path advances particle positions in a ping-pong fragment pass:
//! positions live in a float texture, and each frame a full-screen quad
//! re-integrates every texel with a fixed-step midpoint rule. This module
//! only builds the source text for that pass; texture management, uniform
//! upload and draw calls belong to the external renderer.
//!
//! A system's derivative enters the fragment shader through its
//! [`OdeSystem::shader_chunk`], spliced at the `<ODE_SYSTEM>` marker.

use crate::systems::OdeSystem;

/// Uniform name of the ping-pong input texture.
pub const INPUT_TEXTURE_UNIFORM: &str = "uInputTexture";

/// Splice marker replaced by a system's shader chunk.
pub const SYSTEM_MARKER: &str = "<ODE_SYSTEM>";

/// Vertex shader for the full-screen quad pass.
pub const QUAD_VERTEX_SHADER: &str = r#"precision highp float;

out vec2 vUv;

void main() {
  vUv = uv;
  gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

/// Fragment shader seeding the position texture with random points.
pub const RANDOM_INIT_SHADER: &str = r#"precision highp float;

in vec2 vUv;

out vec4 fragColor;

float random(vec2 v) {
  return fract(sin(dot(v.xy, vec2(12.9898,78.233))) * 43758.5453123);
}

void main() {
  vec3 pos = vec3(random(vUv + 5.0), random(vUv - 5.0), random(vUv)) * 100.0 - 50.0;
  fragColor = vec4(pos, 1.0);
}
"#;

/// Integration fragment shader template with the system left open.
const FRAGMENT_TEMPLATE: &str = r#"precision highp sampler2D;
precision highp float;

in vec2 vUv;

uniform sampler2D uInputTexture;
uniform float iterations;
uniform float stepSize;

out vec4 fragColor;

<ODE_SYSTEM>

vec3 midPoint(vec3 pos, float h) {
  vec3 posDot = xdot(pos + h / 2.0 * xdot(pos));
  return pos + h * posDot;
}

void main() {
  vec3 pos = texture(uInputTexture, vUv).xyz;

  float i = 0.0;
  while ((i < iterations) && (i < 100.0)) {
    pos = midPoint(pos, stepSize);
    i++;
  }

  fragColor = vec4(pos, length(pos));
}
"#;

/// Build the integration fragment shader for a system, with its parameters
/// declared as uniforms.
pub fn build_fragment_shader(system: &dyn OdeSystem) -> String {
    FRAGMENT_TEMPLATE.replace(SYSTEM_MARKER, &system.shader_chunk())
}

/// Build the integration fragment shader with the system's current parameter
/// values baked in as constants, so no per-parameter uniforms are needed.
pub fn build_fragment_shader_baked(system: &dyn OdeSystem) -> String {
    FRAGMENT_TEMPLATE.replace(SYSTEM_MARKER, &system.shader_chunk_baked())
}
