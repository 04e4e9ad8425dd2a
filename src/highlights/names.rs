use std::collections::HashMap;

/// Display names for frequently reported Taiwan-listed stocks.
const BUILTIN: &[(&str, &str)] = &[
    ("2330", "台積電"),
    ("2454", "聯發科"),
    ("2317", "鴻海"),
    ("2308", "台達電"),
    ("2412", "中華電"),
    ("2881", "富邦金"),
    ("2882", "國泰金"),
    ("2891", "中信金"),
    ("2886", "兆豐金"),
    ("2884", "玉山金"),
    ("2002", "中鋼"),
    ("1301", "台塑"),
    ("1303", "南亞"),
    ("1326", "台化"),
    ("2603", "長榮"),
    ("2609", "陽明"),
    ("2615", "萬海"),
    ("3037", "欣興"),
    ("8046", "南電"),
    ("6153", "嘉聯益"),
    ("2353", "宏碁"),
    ("2382", "廣達"),
    ("6669", "緯穎"),
    ("3017", "奇鋐"),
    ("2356", "英業達"),
    ("2409", "友達"),
    ("3481", "群創"),
    ("6116", "彩晶"),
    ("2327", "國巨"),
    ("2492", "華新科"),
    ("2344", "華邦電"),
    ("8299", "群聯"),
    ("4967", "十銓"),
    ("2395", "研華"),
    ("6121", "新普"),
    ("6244", "茂迪"),
    ("3576", "聯合再生"),
    ("6443", "元晶"),
    ("4743", "合一"),
    ("6446", "藥華藥"),
    ("1760", "寶齡富錦"),
    ("2379", "瑞昱"),
    ("2303", "聯電"),
    ("3711", "日月光投控"),
];

/// Maps stock ids to display names. Unknown ids display as themselves.
#[derive(Debug, Clone)]
pub struct StockNames {
    map: HashMap<String, String>,
}

impl Default for StockNames {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StockNames {
    /// The built-in table of common large caps.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(id, name)| ((*id).to_string(), (*name).to_string()))
            .collect()
    }

    /// A table with no entries; every id displays as itself.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Adds or replaces one name.
    pub fn insert(&mut self, stock_id: impl Into<String>, name: impl Into<String>) {
        self.map.insert(stock_id.into(), name.into());
    }

    pub fn display_name<'a>(&'a self, stock_id: &'a str) -> &'a str {
        self.map.get(stock_id).map_or(stock_id, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(String, String)> for StockNames {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, String)> for StockNames {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.map.extend(iter);
    }
}
