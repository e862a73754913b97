//! GPU twin of the catalog.
//!
//! [`PATTERN_SHADER`] evaluates the same formulas as the CPU tables, per
//! pixel. It expects one uniform block at `@group(0) @binding(0)`:
//!
//! ```text
//! offset  field        type
//!      0  resolution   vec2<f32>
//!      8  time         f32
//!     12  category     i32   0 static, 1 dynamic, 2 auxiliary
//!     16  index        i32   position inside the category, -1 for overlay
//!     20  variant      i32   duplicate of index for dynamic, else 0
//!     24  padding      vec2<i32>
//! ```
//!
//! Entry points: `vs_fullscreen` (one oversized triangle, no vertex buffer)
//! and `fs_pattern`.

/// WGSL source for the pattern pass.
pub const PATTERN_SHADER: &str = r"
struct PatternParams {
    resolution: vec2<f32>,
    time: f32,
    category: i32,
    index: i32,
    variant: i32,
    _pad: vec2<i32>,
};

@group(0) @binding(0) var<uniform> params: PatternParams;

@vertex
fn vs_fullscreen(@builtin(vertex_index) vi: u32) -> @builtin(position) vec4<f32> {
    let x = f32(i32(vi & 1u) * 4 - 1);
    let y = f32(i32(vi >> 1u) * 4 - 1);
    return vec4<f32>(x, y, 0.0, 1.0);
}

fn fract1(x: f32) -> f32 { return x - floor(x); }
fn gmod(x: f32, y: f32) -> f32 { return x - y * floor(x / y); }
fn step1(edge: f32, x: f32) -> f32 { return select(1.0, 0.0, x < edge); }
fn smooth_edge(e0: f32, e1: f32, x: f32) -> f32 {
    let t = clamp((x - e0) / (e1 - e0), 0.0, 1.0);
    return t * t * (3.0 - 2.0 * t);
}
fn shash(x: f32, s: f32) -> f32 { return fract1(sin(x) * s); }
fn lhash(cell: vec2<f32>, k: vec2<f32>, phase: f32, s: f32) -> f32 {
    return shash(dot(cell, k) + phase, s);
}
fn q10(v: f32) -> f32 { return clamp(floor(clamp(v, 0.0, 1.0) * 1023.0 + 0.5) / 1023.0, 0.0, 1.0); }
fn q10v(c: vec3<f32>) -> vec3<f32> { return vec3<f32>(q10(c.x), q10(c.y), q10(c.z)); }
fn code10(v: f32) -> i32 { return i32(floor(clamp(v, 0.0, 1.0) * 1023.0 + 0.5)); }
fn hsv2rgb(h: f32, s: f32, v: f32) -> vec3<f32> {
    let p = abs(fract(vec3<f32>(h) + vec3<f32>(0.0, 2.0 / 3.0, 1.0 / 3.0)) * 6.0 - 3.0);
    let rgb = clamp(p - 1.0, vec3<f32>(0.0), vec3<f32>(1.0));
    return v * mix(vec3<f32>(1.0), rgb, s);
}
fn parity(cell: vec2<f32>) -> f32 { return gmod(floor(cell.x) + floor(cell.y), 2.0); }
fn binary(on: bool) -> vec3<f32> { return select(vec3<f32>(0.0), vec3<f32>(1.0), on); }
fn band(x: f32, n: f32) -> i32 { return clamp(i32(floor(x * n)), 0, i32(n) - 1); }

// ---------------------------------------------------------------- static

fn grid(p: vec2<f32>, spacing: f32, bg: f32) -> vec3<f32> {
    let cell = fract(p / spacing);
    let lw = 1.0 / spacing;
    return select(vec3<f32>(bg), vec3<f32>(1.0), cell.x < lw || cell.y < lw);
}

fn color_bars(x: f32) -> vec3<f32> {
    switch band(x, 8.0) {
        case 0: { return vec3<f32>(1.0, 1.0, 1.0); }
        case 1: { return vec3<f32>(1.0, 1.0, 0.0); }
        case 2: { return vec3<f32>(0.0, 1.0, 1.0); }
        case 3: { return vec3<f32>(0.0, 1.0, 0.0); }
        case 4: { return vec3<f32>(1.0, 0.0, 1.0); }
        case 5: { return vec3<f32>(1.0, 0.0, 0.0); }
        case 6: { return vec3<f32>(0.0, 0.0, 1.0); }
        default: { return vec3<f32>(0.0); }
    }
}

fn guide(d: f32, extent: f32) -> f32 { return step1(abs(d) * extent, 1.0); }

fn static_pattern(idx: i32, uv: vec2<f32>, res: vec2<f32>) -> vec3<f32> {
    let p = uv * res;
    switch idx {
        case 0: { return color_bars(uv.x); }
        case 1: { return vec3<f32>(clamp(uv.x, 0.0, 1.0)); }
        case 2: { return vec3<f32>((floor(uv.x * 16.0) + 0.5) / 16.0); }
        case 3: { return vec3<f32>(parity(p)); }
        case 4: { return vec3<f32>(parity(uv * 16.0)); }
        case 5: { return grid(p, 32.0, 0.10); }
        case 6: { return grid(p, 8.0, 0.15); }
        case 7: {
            let m = band(uv.x, 90.0) % 3;
            if m == 0 { return vec3<f32>(1.0, 0.0, 0.0); }
            if m == 1 { return vec3<f32>(0.0, 1.0, 0.0); }
            return vec3<f32>(0.0, 0.0, 1.0);
        }
        case 8: {
            var line = guide(uv.x - 0.5, res.x) + guide(uv.y - 0.5, res.y);
            line += guide(uv.x - 1.0 / 3.0, res.x) + guide(uv.x - 2.0 / 3.0, res.x);
            line += guide(uv.y - 1.0 / 3.0, res.y) + guide(uv.y - 2.0 / 3.0, res.y);
            return vec3<f32>(clamp(line, 0.0, 1.0));
        }
        case 9: { return vec3<f32>(0.0); }
        case 10: { return vec3<f32>(1.0); }
        case 11: { return vec3<f32>(1.0, 0.0, 0.0); }
        case 12: { return vec3<f32>(0.0, 1.0, 0.0); }
        case 13: { return vec3<f32>(0.0, 0.0, 1.0); }
        case 14: { return vec3<f32>(0.5); }
        case 15: {
            let c = uv - 0.5;
            return binary(cos(atan2(c.y, c.x) * 100.0) > 0.0);
        }
        case 16: { return binary(sin(400.0 * uv.x * uv.x) > 0.0); }
        case 17: { return binary(sin(400.0 * uv.y * uv.y) > 0.0); }
        case 18: {
            let c = uv - 0.5;
            return binary(sin(120.0 * dot(c, c)) > 0.0);
        }
        case 19: {
            let g = fract(p / 16.0);
            let d = min(g, 1.0 - g);
            let r = length((d - 0.5 / 16.0) * 16.0);
            return vec3<f32>(smooth_edge(0.15, 0.05, r));
        }
        case 20: {
            let g = (floor(uv.x * 8.0) + 0.5) / 8.0;
            let amp = select(-0.15, 0.15, parity(uv * 16.0) > 0.5);
            return vec3<f32>(clamp(g + amp * (1.0 - g) * g, 0.0, 1.0));
        }
        default: { return vec3<f32>(0.0); }
    }
}

// ---------------------------------------------------------- high entropy

fn blue_noise(p_in: vec2<f32>, t: f32) -> vec3<f32> {
    let p = p_in * 0.5 + vec2<f32>(t * 60.0, t * 47.0);
    let n1 = lhash(floor(p), vec2<f32>(12.9898, 78.233), 0.0, 43758.5453);
    let n2 = lhash(floor(p + 23.0), vec2<f32>(39.3468, 11.135), 0.0, 24634.6345);
    let v = clamp(n1 * 0.7 + n2 * 0.3, 0.0, 1.0);
    return vec3<f32>(fract1(v + 0.33), fract1(v + 0.66), v);
}

fn dynamic_pattern(variant: i32, uv: vec2<f32>, res: vec2<f32>, t: f32) -> vec3<f32> {
    let p = uv * res;
    let cell = floor(p);
    let h1 = lhash(cell, vec2<f32>(12.9898, 78.233), t * 19.19, 43758.5453);
    let h2 = lhash(cell + 13.0, vec2<f32>(39.3468, 11.135), t * 23.17, 24634.6345);
    let h3 = lhash(cell + 71.0, vec2<f32>(9.154, 27.983), t * 29.41, 17431.3711);
    let d = (uv - 0.5) * 2.0;

    var c = vec3<f32>(0.0);
    switch variant {
        case 0: { c = vec3<f32>(h1, h2, h3); }
        case 1: {
            let m1 = lhash(floor(p * 0.5), vec2<f32>(15.7, 47.3), t * 13.3, 31871.1);
            let m2 = lhash(floor(p * 2.7), vec2<f32>(61.3, 21.9), t * 31.7, 55147.3);
            c = vec3<f32>(mix(h1, m1, 0.5), mix(h2, m2, 0.5), mix(h3, h1, 0.5));
        }
        case 2: {
            c = vec3<f32>(
                shash(uv.x * 123.0 + uv.y * 173.0 + t * 2.17, 43758.3),
                shash(uv.x * 231.0 + uv.y * 119.0 - t * 1.93, 31871.7),
                shash(uv.x * 199.0 + uv.y * 157.0 + t * 2.71, 27493.9));
        }
        case 3: { c = blue_noise(p, t); }
        case 4: {
            let v = shash(length(d) * 333.0 + atan2(d.y, d.x) * 177.0 + t * 3.0, 32768.0);
            c = vec3<f32>(v, fract1(v + 0.37), fract1(v + 0.73));
        }
        case 5: {
            let base = 0.5 + 0.5 * sin(90.0 * dot(d, d) + t * 1.8);
            c = vec3<f32>(base, fract1(base + 0.31), fract1(base + 0.62));
        }
        case 6: {
            c = vec3<f32>(
                shash(dot(p, vec2<f32>(0.251, 0.391)) + t * 2.3, 51413.0),
                shash(dot(p, vec2<f32>(0.173, 0.613)) - t * 1.7, 37199.0),
                shash(dot(p, vec2<f32>(0.421, 0.287)) + t * 3.1, 29761.0));
        }
        case 7: { c = hsv2rgb(fract1(uv.x + uv.y + t * 0.05), 0.9, 0.9); }
        case 8: {
            let w = fract1(uv.x * 0.37 + uv.y * 0.41 + t * 0.10);
            c = mix(vec3<f32>(1.0, 0.0, 0.5), vec3<f32>(0.0, 1.0, 1.0), w);
        }
        case 9: {
            c = vec3<f32>(
                sin(uv.x * 157.0 + t * 2.31) * sin(uv.y * 133.0 - t * 1.77) * 0.5 + 0.5,
                sin(uv.x * 141.0 - t * 2.07) * sin(uv.y * 149.0 + t * 1.61) * 0.5 + 0.5,
                sin(uv.x * 163.0 + t * 2.83) * sin(uv.y * 127.0 - t * 1.29) * 0.5 + 0.5);
        }
        case 10: {
            let h = fract1(atan2(d.y, d.x) / 6.2831853 + 1.0);
            c = hsv2rgb(h, 0.9, 1.0 - clamp(length(d), 0.0, 1.0) * 0.2);
        }
        case 11: { c = hsv2rgb(fract1(uv.x + t * 0.05), 0.85, 0.95); }
        case 12: {
            let ph = t * 0.35;
            c = vec3<f32>(
                0.5 + 0.5 * sin(6.28318 * (uv.x * 0.23 + uv.y * 0.31) + ph),
                0.5 + 0.5 * sin(6.28318 * (uv.x * 0.29 + uv.y * 0.17) + ph + 2.094),
                0.5 + 0.5 * sin(6.28318 * (uv.x * 0.19 + uv.y * 0.27) + ph + 4.188));
        }
        case 13: {
            let u = sin(uv.x * 3.0 + t * 0.4) * 0.5;
            let v = sin(uv.y * 3.0 - t * 0.5) * 0.5;
            c = vec3<f32>(
                clamp(0.7 + 1.13983 * v, 0.0, 1.0),
                clamp(0.7 - 0.39465 * u - 0.58060 * v, 0.0, 1.0),
                clamp(0.7 + 2.03211 * u, 0.0, 1.0));
        }
        default: { c = vec3<f32>(0.0); }
    }
    return q10v(c);
}

// -------------------------------------------------------------- auxiliary

fn flip_phase(t: f32) -> f32 { return gmod(floor(t * 120.0), 2.0); }

fn flip_bit(v: f32, plane: i32, flipping: bool) -> f32 {
    var code = code10(v);
    if flipping { code = code ^ (1i << u32(plane)); }
    return clamp(f32(code) / 1023.0, 0.0, 1.0);
}

fn ufo(uv: vec2<f32>, t: f32) -> vec3<f32> {
    var col = vec3<f32>(0.02);
    for (var row = 0; row < 3; row++) {
        let i = f32(row);
        let y = mix(0.2, 0.8, (i + 0.5) / 3.0);
        let speed = mix(0.6, 2.5, i / 2.0);
        let center = vec2<f32>(fract1(t * speed), y);
        var d = uv - center;
        d.x *= 2.0;
        let body = smooth_edge(0.08, 0.075, length(d));
        let dome = smooth_edge(0.05, 0.045, length(uv - (center + vec2<f32>(0.0, 0.035))));
        let trail = exp(-abs(uv.x - center.x) * 30.0) * smooth_edge(0.02, 0.0, abs(uv.y - y));
        let cover = max(body, dome);
        let hull = mix(vec3<f32>(0.1), vec3<f32>(0.9), body) * cover;
        let canopy = mix(vec3<f32>(0.1, 0.8, 1.0), vec3<f32>(1.0), dome) * (0.9 * cover);
        let flame = vec3<f32>(1.0, 0.8, 0.2) * trail;
        col = max(max(max(col, hull), canopy), flame);
    }
    return col;
}

fn aux_pattern(idx: i32, uv: vec2<f32>, res: vec2<f32>, t: f32) -> vec3<f32> {
    let p = uv * res;
    let c = uv - 0.5;
    switch idx {
        case 0: {
            let pos = fract1(t * 0.25);
            var dx = abs(uv.x - pos);
            dx = min(dx, 1.0 - dx);
            let bar = step1(dx, 0.05);
            let edge = smooth_edge(0.05, 0.04, dx);
            let body = mix(vec3<f32>(0.0), vec3<f32>(1.0), bar);
            return mix(body, vec3<f32>(1.0, 1.0, 0.3), edge * 0.6);
        }
        case 1: { return ufo(uv, t); }
        case 2: { return vec3<f32>(abs(parity(p) - flip_phase(t))); }
        case 3: {
            let z = c * 2.0;
            let ph = 90.0 * dot(z, z) + t * 1.2;
            return 0.5 + 0.5 * sin(vec3<f32>(ph, ph + 2.1, ph + 4.2));
        }
        case 4: {
            let bit = i32(gmod(floor(t * 2.0), 5.0));
            let flipping = flip_phase(t) > 0.5;
            return vec3<f32>(
                flip_bit(uv.x, bit, flipping),
                flip_bit(uv.y, (bit + 1) % 5, flipping),
                flip_bit(fract1(uv.x + uv.y), (bit + 2) % 5, flipping));
        }
        case 5: {
            let cb = parity(uv * 24.0);
            let phase = gmod(floor(t * 2.0), 3.0);
            var col = vec3<f32>(0.0, 0.0, 1.0);
            if phase < 0.5 { col = vec3<f32>(1.0, 0.0, 0.0); }
            else if phase < 1.5 { col = vec3<f32>(0.0, 1.0, 0.0); }
            return mix(vec3<f32>(0.0), col, cb);
        }
        case 6: { return blue_noise(p, t); }
        case 7: {
            let k = mix(10.0, 250.0, 0.5 + 0.5 * sin(t * 0.7));
            return vec3<f32>(0.5 + 0.5 * sin(k * length(c) + t * 2.0));
        }
        case 8: { return binary(sin((atan2(c.y, c.x) + t * 0.8) * 120.0) > 0.0); }
        case 9: { return vec3<f32>(parity(uv * 16.0)); }
        default: { return vec3<f32>(0.0); }
    }
}

// ------------------------------------------------------------------ entry

@fragment
fn fs_pattern(@builtin(position) frag: vec4<f32>) -> @location(0) vec4<f32> {
    if params.index == -1 {
        return vec4<f32>(0.0, 0.0, 0.0, 0.7);
    }
    let res = max(params.resolution, vec2<f32>(1.0));
    let uv = vec2<f32>(frag.x / res.x, 1.0 - frag.y / res.y);
    var color = vec3<f32>(0.0);
    switch params.category {
        case 0: { color = static_pattern(params.index, uv, res); }
        case 1: { color = dynamic_pattern(params.variant, uv, res, params.time); }
        case 2: { color = aux_pattern(params.index, uv, res, params.time); }
        default: { color = vec3<f32>(0.0); }
    }
    return vec4<f32>(clamp(color, vec3<f32>(0.0), vec3<f32>(1.0)), 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_points_present() {
        assert!(PATTERN_SHADER.contains("fn vs_fullscreen"));
        assert!(PATTERN_SHADER.contains("fn fs_pattern"));
        assert!(PATTERN_SHADER.contains("params.index == -1"));
    }

    #[test]
    fn test_hash_constants_match_cpu() {
        for constant in ["43758.5453", "24634.6345", "17431.3711", "31871.1", "55147.3"] {
            assert!(PATTERN_SHADER.contains(constant), "{constant}");
        }
    }

    #[test]
    fn test_shader_validates() {
        let module = naga::front::wgsl::parse_str(PATTERN_SHADER)
            .unwrap_or_else(|err| panic!("{}", err.emit_to_string(PATTERN_SHADER)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .unwrap_or_else(|err| panic!("{err:?}"));
    }

    #[test]
    fn test_braces_balance() {
        let open = PATTERN_SHADER.matches('{').count();
        let close = PATTERN_SHADER.matches('}').count();
        assert_eq!(open, close);
    }
}
