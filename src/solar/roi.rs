use crate::numeric::to_fixed;

/// 연간 절감액 환산에 쓰는 개월 수.
pub const MONTHS_PER_YEAR: f64 = 12.0;
/// 순절감액을 평가하는 기간 [년].
pub const ANALYSIS_YEARS: f64 = 20.0;

/// 화폐 값 표시 자릿수.
pub const CURRENCY_DIGITS: usize = 2;
/// 회수기간 표시 자릿수.
pub const YEARS_DIGITS: usize = 1;

/// 태양광 ROI 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiInput {
    /// 설비 설치비 [$]
    pub system_cost: f64,
    /// 월 전기요금 [$/월]
    pub monthly_bill: f64,
    /// 전력 단가 [$/kWh]. 입력만 받고 현재 계산식에는 쓰지 않는다.
    pub electricity_rate: f64,
}

/// 태양광 ROI 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiResult {
    /// 연간 절감액 [$/년]
    pub annual_savings: f64,
    /// 단순 회수기간 [년]
    pub break_even_years: f64,
    /// 20년 순절감액 [$]. 설치비가 더 크면 음수.
    pub twenty_year_roi: f64,
}

/// 화면에 그대로 표시하는 결과 문자열.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoiReport {
    /// 연간 절감액, 소수 둘째 자리
    pub annual_savings: String,
    /// 회수기간, 소수 첫째 자리
    pub break_even: String,
    /// 20년 순절감액, 소수 둘째 자리
    pub twenty_year_roi: String,
}

/// 월 전기요금 전액을 절감한다고 보고 연간 절감액, 회수기간, 20년 순절감액을 계산한다.
///
/// 입력 검증은 하지 않는다. 월 요금이 0이면 회수기간은 무한대(설치비도 0이면 NaN)가 되고,
/// NaN 입력은 그대로 결과에 전달된다.
pub fn calculate_roi(input: &RoiInput) -> RoiResult {
    let annual_savings = input.monthly_bill * MONTHS_PER_YEAR;
    let break_even_years = input.system_cost / annual_savings;
    let twenty_year_roi = annual_savings * ANALYSIS_YEARS - input.system_cost;
    RoiResult {
        annual_savings,
        break_even_years,
        twenty_year_roi,
    }
}

impl RoiResult {
    /// 표시용 문자열로 변환한다.
    pub fn report(&self) -> RoiReport {
        RoiReport {
            annual_savings: to_fixed(self.annual_savings, CURRENCY_DIGITS),
            break_even: to_fixed(self.break_even_years, YEARS_DIGITS),
            twenty_year_roi: to_fixed(self.twenty_year_roi, CURRENCY_DIGITS),
        }
    }

    /// 설치비를 20년 안에 회수하지 못하는 경우.
    pub fn is_net_loss(&self) -> bool {
        self.twenty_year_roi < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(cost: f64, bill: f64) -> RoiInput {
        RoiInput {
            system_cost: cost,
            monthly_bill: bill,
            electricity_rate: 0.13,
        }
    }

    #[test]
    fn rate_does_not_change_result() {
        let a = calculate_roi(&input(25000.0, 150.0));
        let b = calculate_roi(&RoiInput {
            electricity_rate: 0.42,
            ..input(25000.0, 150.0)
        });
        assert_eq!(a, b);
    }

    #[test]
    fn negative_net_savings_flagged() {
        let res = calculate_roi(&input(50000.0, 50.0));
        assert!(res.is_net_loss());
        assert!(!calculate_roi(&input(10000.0, 100.0)).is_net_loss());
    }

    #[test]
    fn report_digits() {
        let report = calculate_roi(&input(300.0, 100.0)).report();
        // 300 / 1200 = 0.25, 절반은 올림
        assert_eq!(report.break_even, "0.3");
        assert_eq!(report.annual_savings, "1200.00");
        assert_eq!(report.twenty_year_roi, "23700.00");
    }
}
