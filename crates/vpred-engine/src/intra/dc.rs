//! DC 预测与 DC 边界滤波.

use vpred_core::{BitDepth, BlockMut, Neighbors, Sample};

use super::ReferenceSamples;

/// 边界滤波强度, 按块尺寸下标 `log2(N) - 1` 查表 (4x4 -> 1, ..., 128x128 -> 6)
const DC_FILTER_PROFILE: [u8; 7] = [0, 3, 2, 1, 0, 0, 0];

/// 计算 DC 值
pub(super) fn dc_value(refs: &ReferenceSamples, neighbors: Neighbors) -> i32 {
    let n = refs.size() as i32;
    let above = neighbors.has_above();
    let left = neighbors.has_left();

    let mut sum = 0i32;
    if above {
        sum += refs.above()[1..=refs.size()].iter().sum::<i32>();
    }
    if left {
        sum += refs.left()[1..=refs.size()].iter().sum::<i32>();
    }

    match (above, left) {
        (true, true) => (sum + n) / (2 * n),
        (true, false) | (false, true) => (sum + n / 2) / n,
        // 无邻居时参考构建已在该位置填好默认值
        (false, false) => refs.left()[1],
    }
}

/// 模式 DC: 用邻居平均值填满整块
pub(super) fn predict(refs: &ReferenceSamples, neighbors: Neighbors, dst: &mut BlockMut<'_>) {
    let n = refs.size();
    let dc = dc_value(refs, neighbors) as Sample;
    for k in 0..n {
        dst.row_mut(k, n).fill(dc);
    }
}

/// DC 边界滤波强度, 0 表示不滤波 (含表外尺寸)
pub(super) fn filter_profile(size: usize) -> u8 {
    (size.trailing_zeros() as usize)
        .checked_sub(1)
        .and_then(|index| DC_FILTER_PROFILE.get(index))
        .copied()
        .unwrap_or(0)
}

/// 以参考样本重新混合预测块的首行与首列
pub(super) fn boundary_filter(
    refs: &ReferenceSamples,
    bit_depth: BitDepth,
    dst: &mut BlockMut<'_>,
) {
    let n = refs.size();
    let above = refs.above();
    let left = refs.left();
    let stride = dst.stride;
    let data = &mut *dst.data;
    let px = |v: Sample| i32::from(v);

    match filter_profile(n) {
        1 => {
            let dc = px(data[0]);
            data[0] = bit_depth.clip((above[1] + left[1] + 6 * dc + 4) >> 3);
            for x in 1..n {
                data[x] = bit_depth.clip((above[x + 1] + 7 * px(data[x]) + 4) >> 3);
            }
            for y in 1..n {
                let i = y * stride;
                data[i] = bit_depth.clip((left[y + 1] + 7 * px(data[i]) + 4) >> 3);
            }
        }
        2 => {
            let dc = px(data[0]);
            data[0] = bit_depth.clip((above[1] + left[1] + 2 * dc + 2) >> 2);
            for x in 1..n {
                data[x] = bit_depth.clip((above[x + 1] + 3 * px(data[x]) + 2) >> 2);
            }
            for y in 1..n {
                let i = y * stride;
                data[i] = bit_depth.clip((left[y + 1] + 3 * px(data[i]) + 2) >> 2);
            }
        }
        3 => {
            let tmp = above[1] + left[1];
            data[0] = bit_depth.clip((tmp + ((tmp + px(data[0])) << 1) + 4) >> 3);
            for x in 1..n {
                let tmp = above[x + 1] + px(data[x]);
                data[x] = bit_depth.clip((tmp + ((tmp + px(data[x])) << 1) + 4) >> 3);
            }
            for y in 1..n {
                let i = y * stride;
                let tmp = px(data[i]) + left[y + 1];
                data[i] = bit_depth.clip((tmp + ((tmp + px(data[i])) << 1) + 4) >> 3);
            }
        }
        _ => {}
    }
}
