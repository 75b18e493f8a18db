//! Relevance tables: industry keywords, company aliases and noise patterns.
//!
//! The built-in tables cover the industries the digest tracks. A JSON file
//! with the same shape can replace any of them at startup; fields missing
//! from the file keep their built-in values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Keywords that mark an article as belonging to an industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryKeywords {
    pub industry: String,
    pub keywords: Vec<String>,
}

/// A tracked company and the names it appears under in the press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    pub industry: String,
    pub aliases: Vec<String>,
    #[serde(default)]
    pub major: bool,
    #[serde(default)]
    pub global: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub industries: Vec<IndustryKeywords>,
    pub companies: Vec<CompanyEntry>,
    /// Sports vocabulary; company mentions inside sports coverage are ignored.
    pub exclusion_contexts: Vec<String>,
    /// Case-insensitive regexes for advertising and off-topic content.
    pub exclusion_patterns: Vec<String>,
    /// Domestic articles need one of these, or a company mention, to pass.
    pub business_keywords: Vec<String>,
    /// Drop articles that mention no tracked company.
    pub require_company: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            industries: DEFAULT_INDUSTRY_KEYWORDS
                .iter()
                .map(|(industry, keywords)| IndustryKeywords {
                    industry: industry.to_string(),
                    keywords: to_strings(keywords),
                })
                .collect(),
            companies: DEFAULT_COMPANIES
                .iter()
                .map(|seed| CompanyEntry {
                    name: seed.name.to_string(),
                    industry: seed.industry.to_string(),
                    aliases: to_strings(seed.aliases),
                    major: seed.major,
                    global: seed.global,
                })
                .collect(),
            exclusion_contexts: to_strings(DEFAULT_EXCLUSION_CONTEXTS),
            exclusion_patterns: to_strings(DEFAULT_EXCLUSION_PATTERNS),
            business_keywords: to_strings(DEFAULT_BUSINESS_KEYWORDS),
            require_company: false,
        }
    }
}

impl FilterConfig {
    /// Load tables from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse filter config {}", path.display()))
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

struct CompanySeed {
    name: &'static str,
    industry: &'static str,
    aliases: &'static [&'static str],
    major: bool,
    global: bool,
}

const fn domestic(
    name: &'static str,
    industry: &'static str,
    aliases: &'static [&'static str],
    major: bool,
) -> CompanySeed {
    CompanySeed {
        name,
        industry,
        aliases,
        major,
        global: false,
    }
}

const fn global(
    name: &'static str,
    industry: &'static str,
    aliases: &'static [&'static str],
    major: bool,
) -> CompanySeed {
    CompanySeed {
        name,
        industry,
        aliases,
        major,
        global: true,
    }
}

pub const DEFAULT_INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("자동차", &["현대차", "기아", "전기차", "완성차", "자율주행", "자동차"]),
    ("조선", &["조선", "LNG운반선", "선박", "삼성중공업", "한화오션", "HD현대"]),
    ("방산", &["방산", "방위산업", "자주포", "전투기", "미사일", "한화에어로스페이스"]),
    ("가전", &["가전", "냉장고", "세탁기", "TV", "삼성전자", "LG전자"]),
    ("반도체", &["반도체", "HBM", "파운드리", "D램", "낸드", "SK하이닉스"]),
    ("IT/AI", &["인공지능", "생성형", "AI", "클라우드", "데이터센터", "네이버", "카카오"]),
    ("배터리", &["배터리", "이차전지", "2차전지", "양극재", "전고체", "LG에너지솔루션"]),
];

// Short names such as "삼성", "LG" or "한화" are left out: they collide with
// baseball teams.
const DEFAULT_COMPANIES: &[CompanySeed] = &[
    domestic("현대자동차", "자동차", &["현대자동차", "현대차", "현대차그룹"], true),
    domestic("기아", "자동차", &["기아자동차", "기아차"], true),
    domestic("현대모비스", "자동차", &["현대모비스"], true),
    domestic("만도", "자동차", &["만도", "HL만도"], false),
    domestic("현대위아", "자동차", &["현대위아"], false),
    domestic("한온시스템", "자동차", &["한온시스템"], false),
    domestic("HD한국조선해양", "조선", &["HD한국조선해양", "HD조선해양", "HD현대"], true),
    domestic("삼성중공업", "조선", &["삼성중공업"], true),
    domestic("한화오션", "조선", &["한화오션", "대우조선해양"], true),
    domestic("HD현대중공업", "조선", &["HD현대중공업", "현대중공업"], true),
    domestic("HD현대미포", "조선", &["HD현대미포", "현대미포조선"], false),
    domestic(
        "한화에어로스페이스",
        "방산",
        &["한화에어로스페이스", "한화에어로", "한화디펜스"],
        true,
    ),
    domestic("LIG넥스원", "방산", &["LIG넥스원", "LIG넥스"], true),
    domestic("KAI", "방산", &["KAI", "한국항공우주산업", "한국항공우주"], true),
    domestic("현대로템", "방산", &["현대로템"], true),
    domestic("한화시스템", "방산", &["한화시스템"], true),
    domestic("풍산", "방산", &["풍산그룹", "풍산탄약"], false),
    domestic(
        "삼성전자",
        "가전",
        &["삼성전자", "삼성디스플레이", "삼성바이오로직스", "삼성파운드리"],
        true,
    ),
    domestic("LG전자", "가전", &["LG전자", "LG디스플레이", "LG화학", "LG이노텍"], true),
    domestic("쿠쿠전자", "가전", &["쿠쿠전자", "쿠쿠홈시스"], false),
    domestic("코웨이", "가전", &["코웨이"], false),
    domestic("SK하이닉스", "반도체", &["SK하이닉스"], true),
    domestic("DB하이텍", "반도체", &["DB하이텍"], false),
    domestic("한미반도체", "반도체", &["한미반도체"], false),
    domestic("주성엔지니어링", "반도체", &["주성엔지니어링", "주성엔지"], false),
    domestic("리노공업", "반도체", &["리노공업"], false),
    domestic("테스", "반도체", &["테스나", "TESK"], false),
    domestic("네이버", "IT/AI", &["네이버", "NAVER", "네이버클라우드"], true),
    domestic(
        "카카오",
        "IT/AI",
        &["카카오", "카카오엔터프라이즈", "카카오뱅크", "카카오페이"],
        true,
    ),
    domestic("삼성SDS", "IT/AI", &["삼성SDS"], true),
    domestic("쿠팡", "IT/AI", &["쿠팡", "쿠팡이츠"], true),
    domestic("토스", "IT/AI", &["토스", "비바리퍼블리카", "토스뱅크", "토스증권"], false),
    domestic("크래프톤", "IT/AI", &["크래프톤", "KRAFTON"], false),
    domestic("LG에너지솔루션", "배터리", &["LG에너지솔루션", "LGES"], true),
    domestic("SK온", "배터리", &["SK온", "SK이노베이션"], true),
    domestic("삼성SDI", "배터리", &["삼성SDI"], true),
    domestic("에코프로비엠", "배터리", &["에코프로비엠", "에코프로"], false),
    domestic("포스코퓨처엠", "배터리", &["포스코퓨처엠", "포스코케미칼"], false),
    global("Tesla", "자동차", &["테슬라", "Tesla", "TSLA"], true),
    global("Toyota", "자동차", &["토요타", "도요타", "Toyota"], true),
    global("Volkswagen", "자동차", &["폭스바겐그룹", "폭스바겐", "Volkswagen"], true),
    global("GM", "자동차", &["GM", "제너럴모터스", "General Motors"], true),
    global("Ford", "자동차", &["포드자동차", "Ford Motor"], true),
    global("BYD", "자동차", &["BYD", "비야디"], true),
    global("Rivian", "자동차", &["리비안", "Rivian"], false),
    global("Lucid", "자동차", &["루시드모터스", "Lucid Motors"], false),
    global("CSSC", "조선", &["중국선박집단", "CSSC", "중국조선"], true),
    global("Imabari", "조선", &["이마바리조선", "이마바리"], false),
    global("Lockheed Martin", "방산", &["록히드마틴", "Lockheed Martin"], true),
    global("Raytheon", "방산", &["레이시온", "RTX", "Raytheon"], true),
    global("Northrop Grumman", "방산", &["노스롭그루먼", "Northrop Grumman"], true),
    global("BAE Systems", "방산", &["BAE시스템즈", "BAE Systems"], true),
    global("General Dynamics", "방산", &["제너럴다이나믹스", "General Dynamics"], true),
    global("Apple", "가전", &["애플", "Apple", "아이폰", "아이패드", "맥북"], true),
    global("Sony", "가전", &["소니", "Sony", "플레이스테이션"], true),
    global("Dyson", "가전", &["다이슨", "Dyson"], false),
    global("Xiaomi", "가전", &["샤오미", "Xiaomi"], true),
    global("NVIDIA", "반도체", &["엔비디아", "NVIDIA", "젠슨황"], true),
    global("AMD", "반도체", &["AMD", "어드밴스드마이크로디바이스"], true),
    global("Intel", "반도체", &["인텔", "Intel"], true),
    global("TSMC", "반도체", &["TSMC", "대만반도체", "타이완반도체"], true),
    global("Qualcomm", "반도체", &["퀄컴", "Qualcomm", "스냅드래곤"], true),
    global("ASML", "반도체", &["ASML", "EUV장비"], true),
    global("Broadcom", "반도체", &["브로드컴", "Broadcom"], true),
    global("Micron", "반도체", &["마이크론", "Micron"], true),
    global("Google", "IT/AI", &["구글", "Google", "알파벳", "Alphabet", "제미나이"], true),
    global("Microsoft", "IT/AI", &["마이크로소프트", "MS", "Microsoft", "코파일럿"], true),
    global("Amazon", "IT/AI", &["아마존", "Amazon", "AWS", "아마존웹서비스"], true),
    global("Meta", "IT/AI", &["메타", "Meta", "META"], true),
    global("OpenAI", "IT/AI", &["오픈AI", "오픈에이아이", "OpenAI", "ChatGPT", "GPT"], true),
    global("Anthropic", "IT/AI", &["앤트로픽", "Anthropic", "클로드"], true),
    global("xAI", "IT/AI", &["xAI", "그록", "Grok"], false),
];

pub const DEFAULT_EXCLUSION_CONTEXTS: &[&str] = &[
    // Baseball
    "이글스", "라이온즈", "트윈스", "타이거즈", "베어스", "자이언츠", "히어로즈", "다이노스",
    "위즈", "랜더스", "타자", "투수", "선발", "불펜", "홈런", "안타", "타점", "방어율",
    "승률", "연패", "연승", "외야수", "내야수", "포수", "1루수", "2루수", "3루수", "유격수",
    // Football
    "FC", "유나이티드", "감독", "이적료", "득점왕", "어시스트",
    // Basketball
    "센터", "가드", "포워드", "리바운드", "3점슛",
    // Leagues and tours
    "KBO", "K리그", "KBL", "KOVO", "PGA", "LPGA", "ATP", "WTA",
];

pub const DEFAULT_EXCLUSION_PATTERNS: &[&str] = &[
    r"\[광고\]", r"\[AD\]", r"\[PR\]", r"\[후원\]", r"\[협찬\]",
    "이벤트 참여", "경품 응모", "할인 쿠폰", "세일 기간", "특가 행사",
    "드라마 출연", "예능 프로그램", "아이돌 그룹", "걸그룹", "보이그룹",
    "연기자", "연기력", "연예인", "셀럽", "스타 화보", "팬덤",
    "콘서트 개최", "팬미팅", "앨범 발매", "음원 차트",
    "축구 경기", "야구 경기", "농구 경기", "올림픽 출전", "월드컵",
    "포토뉴스", r"\[포토\]", r"\[영상\]", r"\[움짤\]",
    "오늘의 운세", "오늘의 날씨", "별자리 운세",
    "맛집 추천", "여행지 추천", "패션 스타일", "뷰티 팁",
    "아파트 분양", "청약 일정", "전세 시세", "월세 가격",
    "국회 본회의", "여당 의원", "야당 대표", "대통령 발언",
    "수능 시험", "대입 전형", "입시 설명회",
    "복권 당첨", "로또 번호",
];

pub const DEFAULT_BUSINESS_KEYWORDS: &[&str] = &[
    "실적", "매출", "영업이익", "순이익", "분기", "연간", "흑자", "적자",
    "수주", "계약", "협약", "MOU", "파트너십", "조원", "억원",
    "인수", "합병", "M&A", "분할", "상장", "IPO", "지분",
    "투자", "증자", "배당", "펀딩", "주가", "시가총액",
    "신사업", "신제품", "출시", "개발", "생산", "양산",
    "공장", "설비", "증설", "수출", "납품",
    "대표이사", "CEO", "사장", "회장", "임원", "인사", "채용",
    "기술", "특허", "R&D", "AI", "인공지능", "자율주행", "배터리", "반도체",
    "시장", "점유율", "업계", "산업", "전망", "분석",
];
