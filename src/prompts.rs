// prompts.rs

/// Descriptions are cut to this many characters before prompting.
pub const PROMPT_DESCRIPTION_CHARS: usize = 100;

fn truncated_description(description: &str) -> String {
    description.chars().take(PROMPT_DESCRIPTION_CHARS).collect()
}

/// First-stage screening: a cheap pass that only needs to separate 1-4 from 5+.
pub fn screening_prompt(title: &str, description: &str) -> String {
    format!(
        "뉴스 관련성 1-10점.

제목: {}
설명: {}

1-4 제외: 정치/사회/연예/스포츠, 광고/홍보, 행사/인터뷰/수상/CSR, 채용/인사, 주가/전망 코멘트,
범죄/사건사고/재판.
5+ 통과: 기업 실적, 수주/계약, 투자/증설, M&A, 정책/규제, 리콜/조사/제재, 생산 차질.

JSON만 출력: {{\"s\":점수}}",
        title,
        truncated_description(description)
    )
}

/// Second-stage importance rating with keywords; 7+ is a critical story.
pub fn importance_prompt(title: &str, description: &str) -> String {
    format!(
        "뉴스 중요도 1-10점.

제목: {}
설명: {}

1-4 제외: 정치/사회/연예/스포츠, 광고/홍보, 행사/인터뷰/수상/CSR, 채용/인사(CEO/구조조정 제외),
단순출시(수치없음), 주가/전망 코멘트.
※범죄/폭력/재판/사망/산재/사건사고는 기업명이 있어도 1-4 기본.
예외(참고 5-6 가능): 리콜/결함/당국조사·제재·과징금, 생산/조업중단·공급차질, 손실(억/조)/대형소송.

7+ 핵심: 실적/가이던스, 수주/계약/공급, 증설/공장/라인/양산, M&A/지분/합병·분할,
정책/규제/보조금/제재. 수치(억/조/%/대), 상대방, 지분, 시행시점 중 하나 이상이 명시된 경우에만 7+.

JSON만 출력: {{\"s\":점수,\"k\":[\"키워드\"]}}",
        title,
        truncated_description(description)
    )
}
