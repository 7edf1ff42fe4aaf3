//! 계산기 입력 폼의 상태. GUI와 CLI가 같은 폼을 공유한다.

use thiserror::Error;
use tracing::debug;

use crate::i18n::keys;
use crate::numeric::parse_float;
use crate::solar::{calculate_roi, RoiInput, RoiReport, RoiResult};

/// 전력 단가 입력의 기본값 [$/kWh].
pub const DEFAULT_ELECTRICITY_RATE: &str = "0.13";

/// 폼 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SystemCost,
    MonthlyBill,
    ElectricityRate,
}

impl Field {
    /// 화면 표시 순서.
    pub const ALL: [Field; 3] = [Field::SystemCost, Field::MonthlyBill, Field::ElectricityRate];

    /// 라벨 번역 키.
    pub fn label_key(self) -> &'static str {
        match self {
            Field::SystemCost => keys::FIELD_SYSTEM_COST,
            Field::MonthlyBill => keys::FIELD_MONTHLY_BILL,
            Field::ElectricityRate => keys::FIELD_ELECTRICITY_RATE,
        }
    }

    /// 입력 예시.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::SystemCost => "e.g., 25000",
            Field::MonthlyBill => "e.g., 150",
            Field::ElectricityRate => "e.g., 0.13",
        }
    }

    /// 비워 두면 제출할 수 없는 항목인지.
    pub fn is_required(self) -> bool {
        !matches!(self, Field::ElectricityRate)
    }
}

/// 폼 제출을 막는 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// 필수 항목이 비어 있음
    #[error("required field is empty: {0:?}")]
    MissingRequired(Field),
}

/// 입력 문자열과 마지막 계산 결과를 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct RoiForm {
    system_cost: String,
    monthly_bill: String,
    electricity_rate: String,
    last: Option<RoiResult>,
    result: Option<RoiReport>,
}

impl Default for RoiForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RoiForm {
    pub fn new() -> Self {
        Self::with_rate(DEFAULT_ELECTRICITY_RATE)
    }

    /// 전력 단가 기본값을 지정해 폼을 만든다(설정 파일 값 등).
    pub fn with_rate(rate: &str) -> Self {
        Self {
            system_cost: String::new(),
            monthly_bill: String::new(),
            electricity_rate: rate.to_string(),
            last: None,
            result: None,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::SystemCost => &self.system_cost,
            Field::MonthlyBill => &self.monthly_bill,
            Field::ElectricityRate => &self.electricity_rate,
        }
    }

    /// 입력 위젯이 직접 편집할 수 있도록 내부 문자열을 빌려준다.
    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::SystemCost => &mut self.system_cost,
            Field::MonthlyBill => &mut self.monthly_bill,
            Field::ElectricityRate => &mut self.electricity_rate,
        }
    }

    pub fn set_value(&mut self, field: Field, text: impl Into<String>) {
        *self.value_mut(field) = text.into();
    }

    /// 현재 입력 문자열을 숫자로 해석한 값. 해석 불가 항목은 NaN.
    pub fn input(&self) -> RoiInput {
        RoiInput {
            system_cost: parse_float(&self.system_cost),
            monthly_bill: parse_float(&self.monthly_bill),
            electricity_rate: parse_float(&self.electricity_rate),
        }
    }

    /// 폼을 제출한다. 필수 항목이 비어 있으면 이전 결과를 유지하고 오류를 돌려준다.
    pub fn submit(&mut self) -> Result<&RoiReport, FormError> {
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|f| f.is_required() && self.value(*f).trim().is_empty())
        {
            debug!(?field, "submission blocked");
            return Err(FormError::MissingRequired(field));
        }
        let input = self.input();
        let result = calculate_roi(&input);
        debug!(
            system_cost = input.system_cost,
            monthly_bill = input.monthly_bill,
            electricity_rate = input.electricity_rate,
            annual_savings = result.annual_savings,
            break_even_years = result.break_even_years,
            twenty_year_roi = result.twenty_year_roi,
            "roi calculated"
        );
        self.last = Some(result);
        Ok(self.result.insert(result.report()))
    }

    pub fn result(&self) -> Option<&RoiReport> {
        self.result.as_ref()
    }

    /// 표시 문자열로 바꾸기 전의 마지막 계산 값.
    pub fn last_result(&self) -> Option<&RoiResult> {
        self.last.as_ref()
    }

    pub fn clear_result(&mut self) {
        self.last = None;
        self.result = None;
    }

    /// 입력과 결과를 초기 상태로 되돌린다. 전력 단가는 `rate`로 채운다.
    pub fn reset(&mut self, rate: &str) {
        self.system_cost.clear();
        self.monthly_bill.clear();
        self.electricity_rate = rate.to_string();
        self.clear_result();
        debug!(rate, "form reset");
    }
}
