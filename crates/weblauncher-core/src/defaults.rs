//! Built-in catalog seeded on first run

use crate::models::Site;

const DEFAULT_SITES: &[(&str, &str, &str, &str)] = &[
    ("social_1", "微博", "https://weibo.com", "社交"),
    ("social_2", "微信", "https://wx.qq.com", "社交"),
    ("social_3", "QQ", "https://im.qq.com", "社交"),
    ("social_4", "知乎", "https://www.zhihu.com", "社交"),
    ("social_5", "豆瓣", "https://www.douban.com", "社交"),
    ("tech_1", "GitHub", "https://github.com", "技术"),
    ("tech_2", "百度网盘", "https://pan.baidu.com", "工具"),
    ("tech_3", "阿里云", "https://www.aliyun.com", "工具"),
    ("tech_4", "CSDN", "https://www.csdn.net", "技术"),
    ("tech_5", "Stack Overflow", "https://stackoverflow.com", "技术"),
    ("shopping_1", "淘宝", "https://www.taobao.com", "购物"),
    ("shopping_2", "京东", "https://www.jd.com", "购物"),
    ("shopping_3", "拼多多", "https://www.pinduoduo.com", "购物"),
    ("shopping_4", "唯品会", "https://www.vip.com", "购物"),
    ("shopping_5", "网易严选", "https://you.163.com", "购物"),
    ("news_1", "腾讯新闻", "https://news.qq.com", "新闻"),
    ("news_2", "人民日报", "https://www.people.com.cn", "新闻"),
    ("news_3", "36氪", "https://www.36kr.com", "新闻"),
    ("news_4", "虎嗅", "https://www.huxiu.com", "新闻"),
    ("video_1", "哔哩哔哩", "https://www.bilibili.com", "视频"),
    ("video_2", "腾讯视频", "https://v.qq.com", "视频"),
    ("video_3", "爱奇艺", "https://www.iqiyi.com", "视频"),
    ("video_4", "优酷", "https://www.youku.com", "视频"),
    ("video_5", "芒果TV", "https://www.mgtv.com", "视频"),
    ("education_1", "知乎日报", "https://daily.zhihu.com", "新闻"),
    ("education_2", "中国大学MOOC", "https://www.icourse163.org", "教育"),
    ("education_3", "W3School", "https://www.w3school.com.cn", "技术"),
    ("education_4", "LeetCode", "https://leetcode.cn", "技术"),
    ("live_1", "斗鱼直播", "https://www.douyu.com", "直播"),
    ("live_2", "虎牙直播", "https://www.huya.com", "直播"),
    ("ai_1", "deepseek", "https://www.deepseek.com/zh", "工具"),
];

/// The catalog written to disk when no data file exists
pub fn default_sites() -> Vec<Site> {
    DEFAULT_SITES
        .iter()
        .map(|&(id, name, url, category)| Site::new(id, name, url, category))
        .collect()
}
