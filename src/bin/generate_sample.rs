use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub(crate) const TITLES: [&str; 30] = [
    "O Último Horizonte", "Cidade de Vidro", "Maré Alta", "Noite sem Fim", "Código Vermelho",
    "O Jardim Secreto", "Asas de Ferro", "Caminhos Cruzados", "A Grande Fuga", "Sombras do Passado",
    "Estrela Cadente", "O Guardião", "Terra Prometida", "Velocidade Máxima", "Risos no Escuro",
    "Operação Tempestade", "O Silêncio", "Fronteira Final", "Corações Partidos", "Missão Lunar",
    "O Labirinto", "Ventos do Sul", "A Herança", "Dia de Sorte", "Ruas de Fogo",
    "O Último Samba", "Planeta Azul", "Segredos de Família", "Ataque Final", "Entre Amigos",
];

const GENRES: [&str; 6] = ["Ação", "Drama", "Comédia", "Ficção Científica", "Terror", "Animação"];

pub(crate) const HEADERS: [&str; 9] = [
    "Título",
    "Gênero(s)",
    "Ano de Lançamento",
    "Nota IMDb",
    "Orçamento (USD)",
    "Bilheteria Mundial (USD)",
    "Nota Rotten Tomatoes (Crítica)",
    "Nota Rotten Tomatoes (Público)",
    "Duração (min)",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Roughly one value in `one_in` comes back missing.
    fn maybe(&mut self, one_in: usize, value: f64) -> Option<f64> {
        (self.below(one_in) != 0).then_some(value)
    }
}

/// The sample sheet: bold header row, then one movie per row.
pub(crate) fn sample_workbook() -> Result<Workbook, XlsxError> {
    let mut rng = SimpleRng::new(42);

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Filmes")?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, title) in TITLES.iter().enumerate() {
        let row = i as u32 + 1;
        let genre = if rng.below(4) == 0 {
            format!("{}, {}", GENRES[rng.below(GENRES.len())], GENRES[rng.below(GENRES.len())])
        } else {
            GENRES[rng.below(GENRES.len())].to_string()
        };
        let year = 1995.0 + rng.below(30) as f64;
        let rating = (rng.gauss(6.8, 1.0).clamp(1.0, 10.0) * 10.0).round() / 10.0;
        let budget = (rng.gauss(80.0, 40.0).max(2.0) * 1_000_000.0).round();
        let gross = (budget * rng.gauss(2.5, 1.2).max(0.2)).round();
        let critic = rng.gauss(65.0, 15.0).clamp(0.0, 100.0).round();
        let audience = (critic + rng.gauss(0.0, 12.0)).clamp(0.0, 100.0).round();
        let runtime = rng.gauss(115.0, 20.0).clamp(75.0, 190.0).round();

        sheet.write_string(row, 0, *title)?;
        sheet.write_string(row, 1, &genre)?;

        let numbers = [
            Some(year),
            rng.maybe(8, rating),
            rng.maybe(6, budget),
            rng.maybe(8, gross),
            rng.maybe(10, critic),
            rng.maybe(10, audience),
            rng.maybe(12, runtime),
        ];
        for (offset, value) in numbers.into_iter().enumerate() {
            if let Some(v) = value {
                sheet.write_number(row, offset as u16 + 2, v)?;
            }
        }
    }

    Ok(workbook)
}

fn main() {
    let mut workbook = sample_workbook().expect("Failed to build sample workbook");

    let output_path = "sample_movies.xlsx";
    workbook.save(output_path).expect("Failed to save workbook");

    println!("Wrote {} movies to {output_path}", TITLES.len());
}
