//! 角度预测.
//!
//! 方向下标 `1..=17` 以竖直方向为主 (角度下标 `dir - 9`), `18..=33` 以水平方向为主
//! (角度下标 `dir - 25`). 位移精度为 1/32 样本. 水平方向在转置坐标系中按竖直公式计算,
//! 最后原地转置回来.

use vpred_core::{BlockMut, Sample};

use super::ReferenceSamples;

/// 角度下标绝对值 -> 每行位移 (1/32 样本)
const ANG_TABLE: [i32; 9] = [0, 2, 5, 9, 13, 17, 21, 26, 32];
/// 角度下标绝对值 -> 反向角度 `(256 * 32) / angle`, Q8
const INV_ANG_TABLE: [i32; 9] = [0, 4096, 1638, 910, 630, 482, 390, 315, 256];

/// 竖直/水平分界: 小于该值的方向以竖直为主
const HOR_DIRECTION_START: u8 = 18;

/// 方向下标对应的 (是否竖直, 角度下标)
pub(super) fn direction_params(direction: u8) -> (bool, i32) {
    assert!(
        (1..=33).contains(&direction),
        "角度方向下标越界: {direction}"
    );
    let vertical = direction < HOR_DIRECTION_START;
    let index = if vertical {
        i32::from(direction) - 9
    } else {
        i32::from(direction) - 25
    };
    (vertical, index)
}

/// 角度下标 -> 1/32 样本位移
pub(super) fn intra_pred_angle(angle_index: i32) -> i32 {
    let abs = angle_index.unsigned_abs() as usize;
    angle_index.signum() * ANG_TABLE[abs]
}

pub(super) fn predict(refs: &ReferenceSamples, direction: u8, dst: &mut BlockMut<'_>) {
    let n = refs.size();
    let (vertical, angle_index) = direction_params(direction);
    let abs_index = angle_index.unsigned_abs() as usize;
    let angle = intra_pred_angle(angle_index);
    let inv_angle = INV_ANG_TABLE[abs_index];

    let (main_src, side_src) = if vertical {
        (refs.above(), refs.left())
    } else {
        (refs.left(), refs.above())
    };

    // main[n + j] 对应主参考线上的位置 j, j 可以为负 (由侧参考线投影扩展)
    let mut main = vec![0i32; 3 * n + 1];
    if angle < 0 {
        main[n..=2 * n].copy_from_slice(&main_src[..=n]);
        let limit = (n as i32 * angle) >> 5;
        let mut inv_angle_sum = 128;
        let mut k = -1i32;
        while k > limit {
            inv_angle_sum += inv_angle;
            main[(n as i32 + k) as usize] = side_src[(inv_angle_sum >> 8) as usize];
            k -= 1;
        }
    } else {
        main[n..].copy_from_slice(main_src);
    }

    if angle == 0 {
        for k in 0..n {
            let row = dst.row_mut(k, n);
            for (l, out) in row.iter_mut().enumerate() {
                *out = main[n + l + 1] as Sample;
            }
        }
    } else {
        let mut delta_pos = 0i32;
        for k in 0..n {
            delta_pos += angle;
            let delta_int = delta_pos >> 5;
            let delta_fract = delta_pos & 31;
            let base = n as i32 + delta_int + 1;
            let row = dst.row_mut(k, n);

            if delta_fract != 0 {
                for (l, out) in row.iter_mut().enumerate() {
                    let i = (base + l as i32) as usize;
                    *out = (((32 - delta_fract) * main[i] + delta_fract * main[i + 1] + 16) >> 5)
                        as Sample;
                }
            } else {
                // 整数位置直接复制, 不经过插值公式
                for (l, out) in row.iter_mut().enumerate() {
                    *out = main[(base + l as i32) as usize] as Sample;
                }
            }
        }
    }

    if !vertical {
        transpose_in_place(dst, n);
    }
}

fn transpose_in_place(dst: &mut BlockMut<'_>, n: usize) {
    let stride = dst.stride;
    for k in 0..n.saturating_sub(1) {
        for l in k + 1..n {
            dst.data.swap(k * stride + l, l * stride + k);
        }
    }
}
