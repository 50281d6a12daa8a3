use vpred_core::{BitDepth, BlockMut, Component, Neighbors, Picture, PredictionConfig, Sample};

use crate::inter::{HIGH_PRECISION_OFFSET, InterPredictor, Precision};
use crate::intra::{IntraPredictor, ReferenceSamples};

pub const LUMA_TAPS: [[i32; 8]; 4] = [
    [0, 0, 0, 64, 0, 0, 0, 0],
    [-1, 4, -10, 58, 17, -5, 1, 0],
    [-1, 4, -11, 40, 40, -11, 4, -1],
    [0, 1, -5, 17, 58, -10, 4, -1],
];

pub const CHROMA_TAPS: [[i32; 4]; 8] = [
    [0, 64, 0, 0],
    [-2, 58, 10, -2],
    [-4, 54, 16, -2],
    [-6, 46, 28, -4],
    [-4, 36, 36, -4],
    [-4, 28, 46, -6],
    [-2, 16, 54, -4],
    [-2, 10, 58, -2],
];

pub fn build_config(bit_depth: u32) -> PredictionConfig {
    PredictionConfig {
        bit_depth,
        ..PredictionConfig::default()
    }
}

pub fn build_intra(dc_filter: bool, smoothing: bool) -> IntraPredictor {
    let config = PredictionConfig {
        dc_boundary_filter: dc_filter,
        intra_smoothing: smoothing,
        ..PredictionConfig::default()
    };
    IntraPredictor::new(&config).expect("创建帧内预测器失败")
}

pub fn build_inter(bit_depth: u32, high_accuracy: bool) -> InterPredictor {
    let config = PredictionConfig {
        high_accuracy_bi: high_accuracy,
        ..build_config(bit_depth)
    };
    InterPredictor::new(&config).expect("创建帧间预测器失败")
}

/// 用 `refs` 预测一个方块, 返回按行排列的 N*N 个样本
pub fn predict_intra(
    predictor: &IntraPredictor,
    refs: &ReferenceSamples,
    mode: u8,
    component: Component,
    neighbors: Neighbors,
) -> Vec<Sample> {
    let n = refs.size();
    let mut out = vec![0 as Sample; n * n];
    predictor.predict_with_reference(
        refs,
        mode,
        component,
        neighbors,
        &mut BlockMut::new(&mut out, n),
    );
    out
}

/// 确定性的伪随机样本 (线性同余), 取值覆盖整个位深
pub fn pseudo_random(seed: u32, bit_depth: BitDepth) -> impl FnMut() -> Sample {
    let mut state = seed;
    move || {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        ((state >> 16) as i32 & bit_depth.max_value()) as Sample
    }
}

/// 按函数填充全部平面 (色度坐标传入色度平面), 再扩展边界
pub fn build_picture(
    width: usize,
    height: usize,
    bit_depth: BitDepth,
    mut sample: impl FnMut(Component, isize, isize) -> Sample,
) -> Picture {
    let mut pic = Picture::new(width, height, Picture::default_margin(64), bit_depth)
        .expect("创建参考图像失败");
    for component in Component::ALL {
        let plane = pic.plane_mut(component);
        for y in 0..plane.height() as isize {
            for x in 0..plane.width() as isize {
                plane.set(x, y, sample(component, x, y));
            }
        }
    }
    pic.extend_borders();
    pic
}

pub fn build_constant_picture(width: usize, height: usize, value: Sample) -> Picture {
    build_picture(width, height, BitDepth::EIGHT, |_, _, _| value)
}

pub fn build_random_picture(width: usize, height: usize, bit_depth: BitDepth, seed: u32) -> Picture {
    let mut next = pseudo_random(seed, bit_depth);
    build_picture(width, height, bit_depth, |_, _, _| next())
}

/// 逐样本直接按定义计算的插值结果, 与引擎的两遍实现相互独立
#[allow(clippy::too_many_arguments)]
pub fn reference_interpolate(
    pic: &Picture,
    component: Component,
    x: isize,
    y: isize,
    frac_x: usize,
    frac_y: usize,
    width: usize,
    height: usize,
    precision: Precision,
) -> Vec<Sample> {
    let plane = pic.plane(component);
    let bd = pic.bit_depth();
    let (hx, vy): (Vec<i32>, Vec<i32>) = if component.is_chroma() {
        (CHROMA_TAPS[frac_x].to_vec(), CHROMA_TAPS[frac_y].to_vec())
    } else {
        (LUMA_TAPS[frac_x].to_vec(), LUMA_TAPS[frac_y].to_vec())
    };
    let lead = (hx.len() / 2 - 1) as isize;
    let passes = u32::from(frac_x != 0) + u32::from(frac_y != 0);

    let mut out = Vec::with_capacity(width * height);
    for row in 0..height as isize {
        for col in 0..width as isize {
            let px = x + col;
            let py = y + row;
            let sum: i32 = match (frac_x != 0, frac_y != 0) {
                (false, false) => i32::from(plane.get(px, py)),
                (true, false) => (0..hx.len() as isize)
                    .map(|t| hx[t as usize] * i32::from(plane.get(px + t - lead, py)))
                    .sum(),
                (false, true) => (0..vy.len() as isize)
                    .map(|t| vy[t as usize] * i32::from(plane.get(px, py + t - lead)))
                    .sum(),
                (true, true) => (0..hx.len() as isize)
                    .map(|j| {
                        let column: i32 = (0..vy.len() as isize)
                            .map(|i| {
                                vy[i as usize] * i32::from(plane.get(px + j - lead, py + i - lead))
                            })
                            .sum();
                        hx[j as usize] * column
                    })
                    .sum(),
            };
            out.push(reference_output(sum, passes, precision, bd));
        }
    }
    out
}

fn reference_output(sum: i32, passes: u32, precision: Precision, bd: BitDepth) -> Sample {
    let bits = bd.bits() as i32;
    match (precision, passes) {
        (Precision::Nominal, 0) => sum as Sample,
        (Precision::Nominal, 1) => bd.clip((sum + 32) >> 6),
        (Precision::Nominal, _) => bd.clip((sum + 2048) >> 12),
        (Precision::High, 0) => stored_high(sum << (14 - bits)),
        (Precision::High, 1) => stored_high(rounded_shift(sum, bits - 8)),
        (Precision::High, _) => stored_high(rounded_shift(sum, bits - 2)),
    }
}

fn stored_high(v: i32) -> Sample {
    Sample::try_from(v - HIGH_PRECISION_OFFSET).expect("高精度存储值应落在 i16 内")
}

fn rounded_shift(v: i32, shift: i32) -> i32 {
    if shift == 0 {
        v
    } else {
        (v + (1 << (shift - 1))) >> shift
    }
}

/// 读取输出块的全部样本
pub fn block_samples(data: &[Sample], stride: usize, width: usize, height: usize) -> Vec<Sample> {
    (0..height)
        .flat_map(|y| data[y * stride..y * stride + width].iter().copied())
        .collect()
}
