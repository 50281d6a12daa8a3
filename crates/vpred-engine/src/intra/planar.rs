//! Planar 预测: 以上方行、左侧列以及左下/右上两个端点做双线性拟合.

use vpred_core::{BlockMut, Sample};

use super::ReferenceSamples;

pub(super) fn predict(refs: &ReferenceSamples, dst: &mut BlockMut<'_>) {
    let n = refs.size();
    let shift_1d = n.trailing_zeros();
    let shift_2d = shift_1d + 1;
    let offset = n as i32;

    let top_row = &refs.above()[1..=n];
    let left_column = &refs.left()[1..=n];
    let bottom_left = left_column[n - 1];
    let top_right = top_row[n - 1];

    let bottom_row: Vec<i32> = top_row.iter().map(|&t| bottom_left - t).collect();
    let right_column: Vec<i32> = left_column.iter().map(|&l| top_right - l).collect();
    let mut vertical: Vec<i32> = top_row.iter().map(|&t| t << shift_1d).collect();

    for k in 0..n {
        let mut horizontal = (left_column[k] << shift_1d) + offset;
        let row = dst.row_mut(k, n);
        for l in 0..n {
            horizontal += right_column[k];
            vertical[l] += bottom_row[l];
            row[l] = ((horizontal + vertical[l]) >> shift_2d) as Sample;
        }
    }
}
