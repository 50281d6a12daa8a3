//! AMVP 预测矢量选择.
//!
//! 候选列表由外部按邻域构建, 这里只负责按模式与码流中的下标取出预测矢量.

use vpred_core::MotionVector;

/// 候选列表最大长度
pub const AMVP_MAX_CANDIDATES: usize = 5;

/// 预测矢量下标的获取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmvpMode {
    /// 不在码流中携带下标, 固定取第一个候选
    Implicit,
    /// 候选多于一个时码流携带下标
    Explicit,
}

/// AMVP 候选列表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmvpInfo {
    candidates: Vec<MotionVector>,
}

impl AmvpInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_candidates(candidates: &[MotionVector]) -> Self {
        assert!(
            candidates.len() <= AMVP_MAX_CANDIDATES,
            "AMVP 候选过多: {}",
            candidates.len()
        );
        Self {
            candidates: candidates.to_vec(),
        }
    }

    /// 追加候选, 列表已满时返回 false
    pub fn push(&mut self, mv: MotionVector) -> bool {
        if self.candidates.len() >= AMVP_MAX_CANDIDATES {
            return false;
        }
        self.candidates.push(mv);
        true
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[MotionVector] {
        &self.candidates
    }
}

/// 选择结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MvpSelection {
    pub mv: MotionVector,
    /// 实际使用的候选下标
    pub mvp_idx: usize,
    /// 候选总数
    pub num_candidates: usize,
    /// 下标是否来自码流
    pub signaled: bool,
}

/// 按模式选择预测矢量.
///
/// 隐式模式或候选不超过一个时总是取候选 0, 不读取 `mvp_idx`.
/// 显式模式下 `mvp_idx` 必须落在候选范围内.
pub fn select_mvp(info: &AmvpInfo, mode: AmvpMode, mvp_idx: i32) -> MvpSelection {
    assert!(!info.is_empty(), "AMVP 候选列表为空");
    let num_candidates = info.len();

    if mode == AmvpMode::Implicit || num_candidates <= 1 {
        return MvpSelection {
            mv: info.candidates[0],
            mvp_idx: 0,
            num_candidates,
            signaled: false,
        };
    }

    assert!(
        mvp_idx >= 0 && (mvp_idx as usize) < num_candidates,
        "AMVP 下标越界: {mvp_idx}, 候选数 {num_candidates}"
    );
    let idx = mvp_idx as usize;
    MvpSelection {
        mv: info.candidates[idx],
        mvp_idx: idx,
        num_candidates,
        signaled: true,
    }
}
